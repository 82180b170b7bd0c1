//! Records bucketed by algorithm (report section)

use rustc_hash::FxHashMap;

use crate::record::Record;

/// Per-algorithm record buckets in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Grouped {
    buckets: Vec<(String, Vec<Record>)>,
    index: FxHashMap<String, usize>,
}

impl Grouped {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat sequence by `algorithm`, keeping relative order within each bucket.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut grouped = Self::new();
        grouped.extend(records);
        grouped
    }

    fn bucket_mut(&mut self, algorithm: &str) -> &mut Vec<Record> {
        let idx = match self.index.get(algorithm) {
            Some(&idx) => idx,
            None => {
                let idx = self.buckets.len();
                self.buckets.push((algorithm.to_string(), Vec::new()));
                self.index.insert(algorithm.to_string(), idx);
                idx
            }
        };
        &mut self.buckets[idx].1
    }

    /// Ensure a bucket exists for `algorithm`. An existing bucket keeps its records.
    pub fn open(&mut self, algorithm: &str) {
        self.bucket_mut(algorithm);
    }

    pub fn push(&mut self, record: Record) {
        let algorithm = record.algorithm.clone();
        self.bucket_mut(&algorithm).push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        for record in records {
            self.push(record);
        }
    }

    pub fn get(&self, algorithm: &str) -> Option<&[Record]> {
        self.index
            .get(algorithm)
            .map(|&idx| self.buckets[idx].1.as_slice())
    }

    /// Algorithm names in first-seen order
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.buckets
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total records across all buckets
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }

    /// Flatten back to one sequence, bucket by bucket.
    ///
    /// Equals source order unless a section name was repeated after another section.
    pub fn into_flat(self) -> Vec<Record> {
        self.buckets
            .into_iter()
            .flat_map(|(_, records)| records)
            .collect()
    }
}
