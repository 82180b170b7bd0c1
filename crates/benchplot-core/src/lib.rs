//! Benchplot Core - Common infrastructure for benchmark report tooling
//!
//! Logging, progress reporting, and output sinks shared by the report,
//! chart, and CLI crates.

pub mod accumulator;
pub mod logging;
pub mod progress;
pub mod sink;

// Re-exports for convenience
pub use accumulator::{Accumulator, DEFAULT_BATCH_SIZE, drain_into};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use sink::{ParquetSink, cleanup_tmp_file, is_valid_parquet, tmp_path_for};
