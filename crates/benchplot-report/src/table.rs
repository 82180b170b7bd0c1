//! Tabular store: CSV and Parquet export/reload of run records

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, AsArray, RecordBatch};
use arrow::datatypes::{Float64Type, UInt64Type};
use benchplot_core::{ParquetSink, cleanup_tmp_file, drain_into, tmp_path_for};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::parser::parse_report_with_stats;
use crate::record::{Cost, Record};
use crate::schema;
use crate::transform::RecordAccumulator;

/// Table header, in column order.
pub const CSV_COLUMNS: [&str; 6] = ["nodes", "goal", "cost", "actions", "problem", "search"];

/// On-disk table format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Infer from the file extension (`.csv`, `.parquet`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            other => Err(format!("unknown table format: {other} (expected csv or parquet)")),
        }
    }
}

/// Write records as CSV (header + one row per record) to any writer.
pub fn write_csv_to<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    // explicit header so an empty table still has one
    wtr.write_record(CSV_COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write records to a CSV file via tmp→rename. Returns the row count.
pub fn write_csv(records: &[Record], path: &Path) -> Result<usize> {
    cleanup_tmp_file(path)?;
    let tmp_path = tmp_path_for(path);
    let file = File::create(&tmp_path)
        .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
    write_csv_to(records, BufWriter::new(file))
        .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to finalize {}", path.display()))?;
    Ok(records.len())
}

/// Reload records from CSV. Rows that don't deserialize are skipped with a warning.
pub fn read_csv_from<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    let missing: Vec<&str> = CSV_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        bail!("CSV is missing columns: {}", missing.join(", "));
    }

    let mut records = Vec::new();
    for (idx, row) in rdr.deserialize::<Record>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            // +2: header line, 1-based
            Err(e) => log::warn!("CSV row {}: {e}, skipped", idx + 2),
        }
    }
    Ok(records)
}

pub fn read_csv(path: &Path) -> Result<Vec<Record>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open CSV: {}", path.display()))?;
    read_csv_from(file).with_context(|| format!("Failed to read CSV: {}", path.display()))
}

/// Write records to a zstd-compressed Parquet file. Returns the row count.
pub fn write_parquet(records: &[Record], path: &Path, zstd_level: i32) -> Result<usize> {
    let mut sink = ParquetSink::new(path, schema::runs(), zstd_level)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut acc = RecordAccumulator::new();
    drain_into(&mut acc, records.iter().cloned(), |batch| sink.write_batch(batch))
        .with_context(|| format!("Failed to write Parquet: {}", path.display()))?;
    sink.finalize()
        .with_context(|| format!("Failed to finalize {}", path.display()))
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet is missing column {name}"))
}

fn batch_to_records(batch: &RecordBatch, out: &mut Vec<Record>) -> Result<()> {
    let nodes = column(batch, "nodes")?
        .as_primitive_opt::<UInt64Type>()
        .context("nodes: expected UInt64")?;
    let goal = column(batch, "goal")?
        .as_primitive_opt::<UInt64Type>()
        .context("goal: expected UInt64")?;
    let cost = column(batch, "cost")?
        .as_primitive_opt::<Float64Type>()
        .context("cost: expected Float64")?;
    let actions = column(batch, "actions")?
        .as_primitive_opt::<UInt64Type>()
        .context("actions: expected UInt64")?;
    let problem = column(batch, "problem")?
        .as_string_opt::<i32>()
        .context("problem: expected Utf8")?;
    let search = column(batch, "search")?
        .as_string_opt::<i32>()
        .context("search: expected Utf8")?;

    for i in 0..batch.num_rows() {
        let Some(row_cost) = Cost::from_f64(cost.value(i)) else {
            log::warn!("Parquet row {i}: invalid cost {}, skipped", cost.value(i));
            continue;
        };
        out.push(Record {
            nodes: nodes.value(i),
            goal_checks: goal.value(i),
            cost: row_cost,
            actions: actions.value(i),
            problem_label: problem.value(i).to_string(),
            algorithm: search.value(i).to_string(),
        });
    }
    Ok(())
}

/// Reload records from a Parquet file written by [`write_parquet`].
pub fn read_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open Parquet: {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .and_then(|builder| builder.build())
        .with_context(|| format!("Failed to read Parquet: {}", path.display()))?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch.with_context(|| format!("Failed to decode {}", path.display()))?;
        batch_to_records(&batch, &mut records)?;
    }
    Ok(records)
}

/// Write records in the given format.
pub fn write_table(
    records: &[Record],
    path: &Path,
    format: TableFormat,
    zstd_level: i32,
) -> Result<usize> {
    match format {
        TableFormat::Csv => write_csv(records, path),
        TableFormat::Parquet => write_parquet(records, path, zstd_level),
    }
}

/// Load records from a table (by extension) or else parse the file as a report.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    match TableFormat::from_path(path) {
        Some(TableFormat::Csv) => read_csv(path),
        Some(TableFormat::Parquet) => read_parquet(path),
        None => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read report: {}", path.display()))?;
            let (records, stats) = parse_report_with_stats(&text);
            log::debug!("{}: {stats:?}", path.display());
            stats.log();
            Ok(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_report;
    use tempfile::TempDir;

    const REPORT: &str = "\
depth_limited_search:
      452 nodes |      453 goal |  inf cost |     110 actions | PourProblem((0, 0), 8)
       17 nodes |        8 goal |  733 cost |      14 actions | RouteProblem('A', 'B')
";

    #[test]
    fn csv_header_and_inf_token() {
        let mut out = Vec::new();
        write_csv_to(&parse_report(REPORT), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "nodes,goal,cost,actions,problem,search");
        assert_eq!(lines[1], "452,453,inf,110,\"PourProblem((0, 0), 8)\",depth_limited_search");
        assert_eq!(lines[2], "17,8,733,14,\"RouteProblem('A', 'B')\",depth_limited_search");
    }

    #[test]
    fn csv_reload_reproduces_records() {
        let records = parse_report(REPORT);
        let mut out = Vec::new();
        write_csv_to(&records, &mut out).unwrap();
        let reloaded = read_csv_from(out.as_slice()).unwrap();
        assert_eq!(reloaded, records);
        assert_eq!(reloaded[0].cost, Cost::Unbounded);
    }

    #[test]
    fn empty_table_keeps_header() {
        let mut out = Vec::new();
        write_csv_to(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "nodes,goal,cost,actions,problem,search\n");
    }

    #[test]
    fn pandas_style_csv_loads() {
        let csv = "nodes,goal,cost,actions,problem,search\n\
                   948,109,4.0,112,\"PourProblem((1, 1, 1), 13)\",astar_search\n\
                   452,453,inf,110,\"PourProblem((0, 0), 8)\",depth_limited_search\n";
        let records = read_csv_from(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cost, Cost::Finite(4.0));
        assert_eq!(records[1].cost, Cost::Unbounded);
    }

    #[test]
    fn bad_csv_rows_skipped() {
        let csv = "nodes,goal,cost,actions,problem,search\n\
                   x,1,1,1,P,a\n\
                   1,1,1,1,P,a\n";
        let records = read_csv_from(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn csv_missing_column_fails() {
        let err = read_csv_from("nodes,goal,cost\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("actions"));
    }

    #[test]
    fn csv_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.csv");
        let records = parse_report(REPORT);
        assert_eq!(write_csv(&records, &path).unwrap(), 2);
        assert!(!tmp_path_for(&path).exists());
        assert_eq!(load_records(&path).unwrap(), records);
    }

    #[test]
    fn parquet_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.parquet");
        let records = parse_report(REPORT);
        assert_eq!(write_parquet(&records, &path, 3).unwrap(), 2);
        assert!(benchplot_core::is_valid_parquet(&path));
        assert_eq!(load_records(&path).unwrap(), records);
    }

    #[test]
    fn report_file_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, REPORT).unwrap();
        assert_eq!(load_records(&path).unwrap().len(), 2);
    }

    #[test]
    fn format_from_path() {
        assert_eq!(TableFormat::from_path(Path::new("out.CSV")), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_path(Path::new("out.parquet")), Some(TableFormat::Parquet));
        assert_eq!(TableFormat::from_path(Path::new("report.txt")), None);
        assert_eq!(TableFormat::from_path(Path::new("report")), None);
        assert!("json".parse::<TableFormat>().is_err());
    }
}
