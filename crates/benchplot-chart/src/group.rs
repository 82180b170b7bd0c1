//! Grouping records into charts

use std::fmt;
use std::str::FromStr;

use benchplot_report::{Grouped, Record, distinct_problems};

/// What one chart compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    /// One chart per problem, bars per algorithm
    #[default]
    ByProblem,
    /// One chart per algorithm, bars per run
    ByAlgorithm,
}

impl ChartMode {
    /// Name of the bar axis
    pub fn axis(self) -> &'static str {
        match self {
            Self::ByProblem => "Algorithm",
            Self::ByAlgorithm => "Problem",
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            Self::ByProblem => "problem",
            Self::ByAlgorithm => "algorithm",
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_prefix())
    }
}

impl FromStr for ChartMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(Self::ByProblem),
            "algorithm" | "search" => Ok(Self::ByAlgorithm),
            other => Err(format!("unknown chart mode: {other} (expected problem or algorithm)")),
        }
    }
}

/// Records behind one chart file, each paired with its bar label.
#[derive(Debug, Clone)]
pub struct ChartGroup {
    pub mode: ChartMode,
    /// Problem label or algorithm name
    pub key: String,
    pub bars: Vec<(String, Record)>,
}

impl ChartGroup {
    /// One bar per algorithm: the first run of `problem` in each section.
    fn for_problem(records: &[Record], problem: &str) -> Self {
        let mut bars: Vec<(String, Record)> = Vec::new();
        for record in records.iter().filter(|r| r.problem_label == problem) {
            if !bars.iter().any(|(algorithm, _)| *algorithm == record.algorithm) {
                bars.push((record.algorithm.clone(), record.clone()));
            }
        }
        Self {
            mode: ChartMode::ByProblem,
            key: problem.to_string(),
            bars,
        }
    }

    /// One bar per run of `algorithm`, labelled by problem, in source order.
    fn for_algorithm(algorithm: &str, records: &[Record]) -> Self {
        Self {
            mode: ChartMode::ByAlgorithm,
            key: algorithm.to_string(),
            bars: records
                .iter()
                .map(|r| (r.problem_label.clone(), r.clone()))
                .collect(),
        }
    }

    /// Chart caption for one metric panel
    pub fn title(&self, metric: &str) -> String {
        format!("{metric} by {} for {}", self.mode.axis(), self.key)
    }

    /// File stem: `<mode>_<NN>_<slug>`
    pub fn file_stem(&self, idx: usize) -> String {
        format!("{}_{:02}_{}", self.mode.file_prefix(), idx + 1, slugify(&self.key))
    }
}

/// Lowercase alphanumerics, everything else collapsed to single `_`.
pub fn slugify(key: &str) -> String {
    let mut slug = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("unnamed");
    }
    slug
}

/// Build the chart groups for `mode`.
///
/// `problems` restricts the charts to those problem labels (in the given order
/// for [`ChartMode::ByProblem`]); `None` means every problem in first-seen order.
/// Groups without records are skipped.
pub fn build_groups(
    mode: ChartMode,
    records: &[Record],
    problems: Option<&[&str]>,
) -> Vec<ChartGroup> {
    let groups: Vec<ChartGroup> = match mode {
        ChartMode::ByProblem => {
            let all;
            let problems = match problems {
                Some(selected) => selected,
                None => {
                    all = distinct_problems(records);
                    all.as_slice()
                }
            };
            problems
                .iter()
                .map(|problem| ChartGroup::for_problem(records, problem))
                .collect()
        }
        ChartMode::ByAlgorithm => {
            let selected = records
                .iter()
                .filter(|r| problems.is_none_or(|p| p.contains(&r.problem_label.as_str())))
                .cloned();
            Grouped::from_records(selected)
                .iter()
                .map(|(algorithm, runs)| ChartGroup::for_algorithm(algorithm, runs))
                .collect()
        }
    };

    groups
        .into_iter()
        .filter(|group| {
            if group.bars.is_empty() {
                log::info!("No data found for {}: {}", mode, group.key);
                false
            } else {
                true
            }
        })
        .collect()
}
