//! Per-algorithm summary of parsed runs.
//!
//! Sums exclude the report's own `TOTAL` rows so the figures can be checked
//! against them.

use benchplot_core::fmt_num;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::grouped::Grouped;
use crate::record::{Cost, Record};

/// Aggregated runs of one algorithm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlgorithmSummary {
    pub algorithm: String,
    pub runs: usize,
    /// Runs with an unbounded cost
    pub unsolved: usize,
    pub nodes: u64,
    pub goal_checks: u64,
    pub actions: u64,
    /// Sum of finite costs
    pub cost: f64,
    /// The section's `TOTAL` row, if present
    pub reported_total: Option<Record>,
}

impl AlgorithmSummary {
    fn from_runs(algorithm: &str, records: &[Record]) -> Self {
        let mut summary = Self {
            algorithm: algorithm.to_string(),
            ..Default::default()
        };
        for record in records {
            if record.is_total() {
                summary.reported_total = Some(record.clone());
                continue;
            }
            summary.runs += 1;
            // counts can reach u64::MAX; sums clamp
            summary.nodes = summary.nodes.saturating_add(record.nodes);
            summary.goal_checks = summary.goal_checks.saturating_add(record.goal_checks);
            summary.actions = summary.actions.saturating_add(record.actions);
            match record.cost {
                Cost::Finite(v) => summary.cost += v,
                Cost::Unbounded => summary.unsolved += 1,
            }
        }
        summary
    }

    /// Cost column text: `inf` as soon as one run is unsolved.
    fn cost_text(&self) -> String {
        if self.unsolved > 0 {
            Cost::Unbounded.to_string()
        } else {
            Cost::Finite(self.cost).to_string()
        }
    }
}

/// Summaries in first-seen algorithm order.
pub fn summarize(records: &[Record]) -> Vec<AlgorithmSummary> {
    Grouped::from_records(records.iter().cloned())
        .iter()
        .map(|(algorithm, runs)| AlgorithmSummary::from_runs(algorithm, runs))
        .collect()
}

/// Format summaries as a table.
pub fn format_table(summaries: &[AlgorithmSummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Algorithm")
                .fg(Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Runs").fg(Color::Cyan),
            Cell::new("Unsolved").fg(Color::Cyan),
            Cell::new("Nodes").fg(Color::Cyan),
            Cell::new("Goal").fg(Color::Cyan),
            Cell::new("Cost").fg(Color::Cyan),
            Cell::new("Actions").fg(Color::Cyan),
        ]);

    for s in summaries {
        let unsolved = if s.unsolved > 0 {
            Cell::new(s.unsolved).fg(Color::Red)
        } else {
            Cell::new(s.unsolved).fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(&s.algorithm),
            Cell::new(s.runs),
            unsolved,
            Cell::new(fmt_num(s.nodes)),
            Cell::new(fmt_num(s.goal_checks)),
            Cell::new(s.cost_text()),
            Cell::new(fmt_num(s.actions)),
        ]);
    }

    format!("\n{table}")
}
