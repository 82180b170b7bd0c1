//! benchplot - search benchmark report export and charting
//!
//! Parses the text reports printed by search-algorithm benchmark runs,
//! exports them as CSV or Parquet tables, and renders SVG bar charts.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;
mod select;

use config::Config;

#[derive(Parser)]
#[command(name = "benchplot")]
#[command(about = "Export and chart search benchmark reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./benchplot.toml or ~/.config/benchplot/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse reports into a CSV or Parquet table
    Export(cmd::export::ExportArgs),
    /// Render per-problem or per-algorithm SVG charts
    Chart(cmd::chart::ChartArgs),
    /// List distinct problems with their option numbers
    Problems(cmd::problems::ProblemsArgs),
    /// Per-algorithm totals
    Summary(cmd::summary::SummaryArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(benchplot_core::ProgressContext::new());

    // TTY: warn unless --debug, the progress bar shows activity
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    benchplot_core::init_logging(quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Export(args) => cmd::export::run(args, &config, &progress),
        Command::Chart(args) => cmd::chart::run(args, &config, &progress),
        Command::Problems(args) => cmd::problems::run(args),
        Command::Summary(args) => cmd::summary::run(args),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Output directory",
                &config.output.default_dir.display().to_string(),
            ]);
            table.add_row(vec![
                "Compression level",
                &config.output.compression_level.to_string(),
            ]);
            table.add_row(vec![
                "Chart size",
                &format!("{}x{}", config.chart.width, config.chart.height),
            ]);
            table.add_row(vec![
                "Skip TOTAL rows",
                if config.chart.skip_total { "yes" } else { "no" },
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
