//! Chart subcommand - render metric bar charts as SVG

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use benchplot_chart::{ChartMode, build_groups, render_charts};
use benchplot_core::SharedProgress;
use benchplot_report::{distinct_problems, load_records, without_totals};

use crate::config::Config;
use crate::select::{parse_selection, prompt_selection};

#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Report text file, or a table written by `export`
    pub input: PathBuf,

    /// One chart per problem or one per algorithm
    #[arg(long, value_enum, default_value = "problem")]
    pub by: ByArg,

    /// Pick problems interactively
    #[arg(long, conflicts_with = "problems")]
    pub select: bool,

    /// Comma-separated 1-based problem numbers (see `problems`)
    #[arg(long)]
    pub problems: Option<String>,

    /// Drop TOTAL rows before charting
    #[arg(long)]
    pub skip_total: bool,

    /// Output directory (default: <output.default_dir>/charts)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum ByArg {
    Problem,
    Algorithm,
}

impl From<ByArg> for ChartMode {
    fn from(arg: ByArg) -> Self {
        match arg {
            ByArg::Problem => ChartMode::ByProblem,
            ByArg::Algorithm => ChartMode::ByAlgorithm,
        }
    }
}

pub fn run(args: ChartArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let mut records = load_records(&args.input)?;
    if args.skip_total || config.chart.skip_total {
        records = without_totals(records);
    }

    let problems = distinct_problems(&records);
    let indices = if let Some(list) = &args.problems {
        Some(parse_selection(list, problems.len()))
    } else if args.select {
        let stdin = std::io::stdin();
        Some(prompt_selection(&problems, stdin.lock(), std::io::stdout())?)
    } else {
        None
    };
    let selected: Option<Vec<&str>> =
        indices.map(|indices| indices.into_iter().map(|i| problems[i]).collect());

    if let Some(selected) = &selected {
        if selected.is_empty() {
            log::warn!("No valid problems selected, nothing to chart");
            return Ok(());
        }
        log::info!("Selected problems: {}", selected.join("; "));
    }

    let mode = ChartMode::from(args.by);
    let groups = build_groups(mode, &records, selected.as_deref());
    let output_dir = args
        .output
        .unwrap_or_else(|| config.output.default_dir.join("charts"));

    let summary = render_charts(&groups, &output_dir, &config.chart.options(), progress)?;

    println!();
    println!("=== Chart Summary ===");
    println!("Charts: {} ({mode})", summary.written.len());
    println!("Output: {}", output_dir.display());

    Ok(())
}
