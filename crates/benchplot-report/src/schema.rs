//! Arrow schema for benchmark run tables

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema};

/// One row per run; `cost` holds `+inf` for an unbounded cost.
pub static RUNS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("nodes", DataType::UInt64, false),
        Field::new("goal", DataType::UInt64, false),
        Field::new("cost", DataType::Float64, false),
        Field::new("actions", DataType::UInt64, false),
        Field::new("problem", DataType::Utf8, false),
        Field::new("search", DataType::Utf8, false),
    ]))
});

pub fn runs() -> &'static Schema {
    &RUNS
}
