//! Problems subcommand - list distinct problem labels with their option numbers

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use benchplot_report::{Record, distinct_problems, filter_problem, load_records};

#[derive(Args, Debug)]
pub struct ProblemsArgs {
    /// Report text file, or a table written by `export`
    pub input: PathBuf,
}

/// `(option, problem, runs)` per distinct problem, in first-seen order.
fn problem_rows(records: &[Record]) -> Vec<(usize, &str, usize)> {
    distinct_problems(records)
        .into_iter()
        .enumerate()
        .map(|(i, problem)| (i + 1, problem, filter_problem(records, problem).len()))
        .collect()
}

fn problem_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Option").fg(Color::Cyan),
            Cell::new("Problem").fg(Color::Cyan),
            Cell::new("Runs").fg(Color::Cyan),
        ]);

    for (option, problem, runs) in problem_rows(records) {
        table.add_row(vec![Cell::new(option), Cell::new(problem), Cell::new(runs)]);
    }
    table
}

pub fn run(args: ProblemsArgs) -> Result<()> {
    let records = load_records(&args.input)?;
    if records.is_empty() {
        eprintln!("No records found.");
        return Ok(());
    }
    println!("\n{}", problem_table(&records));
    Ok(())
}
