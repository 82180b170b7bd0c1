//! Benchplot Report - search benchmark report parsing and tabular storage
//!
//! Parses the sectioned text report printed by search-algorithm benchmark
//! runs into flat [`Record`]s, and persists them as CSV or Parquet tables.
//!
//! # Example
//!
//! ```
//! use benchplot_report::{Cost, parse_report};
//!
//! let text = "astar_search:\n  1,696 nodes | 190 goal | inf cost | 204 actions | PourProblem((1, 1, 1), 13)\n";
//! let records = parse_report(text);
//! assert_eq!(records[0].nodes, 1696);
//! assert_eq!(records[0].cost, Cost::Unbounded);
//! assert_eq!(records[0].algorithm, "astar_search");
//! ```

pub mod grouped;
pub mod parser;
pub mod record;
pub mod schema;
pub mod stats;
pub mod table;
pub mod transform;
pub mod views;

// Re-exports
pub use grouped::Grouped;
pub use parser::{
    LineError, ParseStats, parse_data_line, parse_report, parse_report_grouped,
    parse_report_with_stats,
};
pub use record::{Cost, Metric, ParseCostError, Record, TOTAL_LABEL};
pub use stats::{AlgorithmSummary, summarize};
pub use table::{CSV_COLUMNS, TableFormat, load_records, read_csv, write_csv, write_parquet, write_table};
pub use views::{distinct_problems, filter_algorithm, filter_problem, without_totals};
