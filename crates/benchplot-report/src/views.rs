//! Filters over flat record sequences

use rustc_hash::FxHashSet;

use crate::record::Record;

/// Distinct problem labels in first-seen order.
pub fn distinct_problems(records: &[Record]) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    records
        .iter()
        .map(|r| r.problem_label.as_str())
        .filter(|label| seen.insert(*label))
        .collect()
}

/// Records whose label equals `problem` exactly, across all algorithms.
pub fn filter_problem<'a>(records: &'a [Record], problem: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| r.problem_label == problem)
        .collect()
}

pub fn filter_algorithm<'a>(records: &'a [Record], algorithm: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.algorithm == algorithm).collect()
}

/// Drop the per-section `TOTAL` rollup rows.
pub fn without_totals(records: Vec<Record>) -> Vec<Record> {
    records.into_iter().filter(|r| !r.is_total()).collect()
}
