//! Benchmark run record and its metrics

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label of the rollup line each report section ends with.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Token used for a cost with no solution found.
const UNBOUNDED_TOKEN: &str = "inf";

/// Solution cost of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cost {
    Finite(f64),
    /// No solution within limits (`inf` in the report)
    Unbounded,
}

impl Cost {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Finite value, `None` for [`Cost::Unbounded`].
    pub fn finite(&self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(*v),
            Self::Unbounded => None,
        }
    }

    /// Columnar representation: `+inf` for [`Cost::Unbounded`].
    pub fn as_f64(&self) -> f64 {
        self.finite().unwrap_or(f64::INFINITY)
    }

    /// Inverse of [`Cost::as_f64`]. Rejects NaN and negative values.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() || value < 0.0 {
            None
        } else if value.is_infinite() {
            Some(Self::Unbounded)
        } else {
            Some(Self::Finite(value))
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v}"),
            Self::Unbounded => f.write_str(UNBOUNDED_TOKEN),
        }
    }
}

/// Cost token that is neither `inf` nor a non-negative number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCostError {
    token: String,
}

impl fmt::Display for ParseCostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cost {:?}", self.token)
    }
}

impl std::error::Error for ParseCostError {}

impl FromStr for Cost {
    type Err = ParseCostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token == UNBOUNDED_TOKEN {
            return Ok(Self::Unbounded);
        }
        token
            .parse::<f64>()
            .ok()
            .and_then(Self::from_f64)
            .ok_or_else(|| ParseCostError {
                token: token.to_string(),
            })
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct CostVisitor;

impl Visitor<'_> for CostVisitor {
    type Value = Cost;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number or \"inf\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Cost, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Cost, E> {
        Cost::from_f64(v).ok_or_else(|| E::custom(format!("invalid cost {v}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Cost, E> {
        Ok(Cost::Finite(v as f64))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Cost, E> {
        self.visit_f64(v as f64)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(CostVisitor)
    }
}

/// One benchmark run: a data line of the report, tagged with its section.
///
/// Serde names match the table columns `nodes, goal, cost, actions, problem, search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Nodes expanded
    pub nodes: u64,
    /// Goal tests performed
    #[serde(rename = "goal")]
    pub goal_checks: u64,
    pub cost: Cost,
    /// Actions in the solution path
    pub actions: u64,
    /// Problem instance as printed, e.g. `RouteProblem('A', 'B')`
    #[serde(rename = "problem")]
    pub problem_label: String,
    /// Enclosing section name, e.g. `astar_search`
    #[serde(rename = "search")]
    pub algorithm: String,
}

impl Record {
    /// Whether this is the section's own rollup line.
    pub fn is_total(&self) -> bool {
        self.problem_label == TOTAL_LABEL
    }
}

/// Numeric column compared across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Nodes,
    Goal,
    Cost,
    Actions,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Nodes, Metric::Goal, Metric::Cost, Metric::Actions];

    /// Table column name
    pub fn column(self) -> &'static str {
        match self {
            Self::Nodes => "nodes",
            Self::Goal => "goal",
            Self::Cost => "cost",
            Self::Actions => "actions",
        }
    }

    /// Capitalized name for chart titles and axes
    pub fn title(self) -> &'static str {
        match self {
            Self::Nodes => "Nodes",
            Self::Goal => "Goal",
            Self::Cost => "Cost",
            Self::Actions => "Actions",
        }
    }

    /// Metric value of a record; `None` for an unbounded cost.
    pub fn value(self, record: &Record) -> Option<f64> {
        match self {
            Self::Nodes => Some(record.nodes as f64),
            Self::Goal => Some(record.goal_checks as f64),
            Self::Cost => record.cost.finite(),
            Self::Actions => Some(record.actions as f64),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
