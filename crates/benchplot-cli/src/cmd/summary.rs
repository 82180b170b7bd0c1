//! Summary subcommand - per-algorithm totals

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use benchplot_report::stats::format_table;
use benchplot_report::{load_records, summarize};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Report text file, or a table written by `export`
    pub input: PathBuf,
}

pub fn run(args: SummaryArgs) -> Result<()> {
    let records = load_records(&args.input)?;
    let summaries = summarize(&records);
    if summaries.is_empty() {
        eprintln!("No records found.");
        return Ok(());
    }

    println!("{}", format_table(&summaries));
    for s in summaries.iter().filter(|s| s.unsolved > 0) {
        log::info!("{}: {} of {} runs unsolved", s.algorithm, s.unsolved, s.runs);
    }
    Ok(())
}
