//! Transform Records to Arrow RecordBatch

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, StringArray, UInt64Array};
use arrow::datatypes::Schema;
use arrow::error::ArrowError;
use benchplot_core::{Accumulator, DEFAULT_BATCH_SIZE};

use crate::record::Record;
use crate::schema;

/// Column buffers for the runs table
pub struct RecordAccumulator {
    schema: &'static Schema,
    nodes: Vec<u64>,
    goal: Vec<u64>,
    cost: Vec<f64>,
    actions: Vec<u64>,
    problem: Vec<String>,
    search: Vec<String>,
}

impl RecordAccumulator {
    pub fn new() -> Self {
        Self {
            schema: schema::runs(),
            nodes: Vec::with_capacity(DEFAULT_BATCH_SIZE),
            goal: Vec::with_capacity(DEFAULT_BATCH_SIZE),
            cost: Vec::with_capacity(DEFAULT_BATCH_SIZE),
            actions: Vec::with_capacity(DEFAULT_BATCH_SIZE),
            problem: Vec::with_capacity(DEFAULT_BATCH_SIZE),
            search: Vec::with_capacity(DEFAULT_BATCH_SIZE),
        }
    }
}

impl Default for RecordAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for RecordAccumulator {
    type Row = Record;

    fn push(&mut self, row: Record) {
        self.nodes.push(row.nodes);
        self.goal.push(row.goal_checks);
        self.cost.push(row.cost.as_f64());
        self.actions.push(row.actions);
        self.problem.push(row.problem_label);
        self.search.push(row.algorithm);
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn take_batch(&mut self) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt64Array::from(std::mem::take(&mut self.nodes))),
            Arc::new(UInt64Array::from(std::mem::take(&mut self.goal))),
            Arc::new(Float64Array::from(std::mem::take(&mut self.cost))),
            Arc::new(UInt64Array::from(std::mem::take(&mut self.actions))),
            Arc::new(StringArray::from(std::mem::take(&mut self.problem))),
            Arc::new(StringArray::from(std::mem::take(&mut self.search))),
        ];
        RecordBatch::try_new(Arc::new(self.schema.clone()), columns)
    }
}
