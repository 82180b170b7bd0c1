//! Export subcommand - parse reports into a CSV or Parquet table

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use benchplot_core::{SharedProgress, fmt_num};
use benchplot_report::{Record, TableFormat, load_records, write_table};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Report files or glob patterns, concatenated in the given order
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Output file (default: <output.default_dir>/output.<format>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Table format (default: from the output extension, else csv)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum FormatArg {
    Csv,
    Parquet,
}

impl From<FormatArg> for TableFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => TableFormat::Csv,
            FormatArg::Parquet => TableFormat::Parquet,
        }
    }
}

/// Expand glob patterns; a pattern matching nothing is kept as a literal path.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let matches: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("Invalid input pattern: {pattern}"))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Skipping unreadable path: {e}");
                    None
                }
            })
            .collect();
        if matches.is_empty() {
            paths.push(PathBuf::from(pattern));
        } else {
            paths.extend(matches);
        }
    }
    Ok(paths)
}

/// Resolve the output path and format from flags and config.
fn resolve_output(
    output: Option<PathBuf>,
    format: Option<FormatArg>,
    config: &Config,
) -> (PathBuf, TableFormat) {
    let format = format
        .map(TableFormat::from)
        .or_else(|| output.as_deref().and_then(TableFormat::from_path))
        .unwrap_or(TableFormat::Csv);
    let path = output.unwrap_or_else(|| {
        config
            .output
            .default_dir
            .join(format!("output.{}", format.extension()))
    });
    (path, format)
}

pub fn run(args: ExportArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    let (output, format) = resolve_output(args.output, args.format, config);

    let pb = progress.count_bar("parse", inputs.len() as u64);
    let mut records: Vec<Record> = Vec::new();
    for path in &inputs {
        let parsed = load_records(path)?;
        log::info!("{}: {} records", path.display(), fmt_num(parsed.len() as u64));
        records.extend(parsed);
        pb.inc(1);
    }
    pb.finish_and_clear();
    if records.is_empty() {
        bail!("No records found in {} input(s)", inputs.len());
    }

    create_parent_dir(&output)?;
    let pb = progress.stage_line("write");
    pb.set_message(output.display().to_string());
    let rows = write_table(&records, &output, format, config.output.compression_level)?;
    pb.finish_and_clear();

    println!();
    println!("=== Export Summary ===");
    println!("Inputs: {}", inputs.len());
    println!("Records: {}", fmt_num(rows as u64));
    println!("Output: {} ({format})", output.display());

    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display())),
        _ => Ok(()),
    }
}
