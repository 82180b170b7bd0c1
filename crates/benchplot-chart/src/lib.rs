//! Benchplot Chart - comparison bar charts for search benchmark runs
//!
//! Each chart is one SVG holding a 2×2 grid, one panel per metric
//! (nodes, goal, cost, actions):
//!
//! - [`ChartMode::ByProblem`]: one file per problem, one bar per algorithm
//! - [`ChartMode::ByAlgorithm`]: one file per algorithm, one bar per run

pub mod group;
pub mod render;

pub use group::{ChartGroup, ChartMode, build_groups};
pub use render::{ChartOptions, ChartSummary, render_charts};
