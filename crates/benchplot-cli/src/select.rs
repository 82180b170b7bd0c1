//! Interactive problem selection

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Parse a comma-separated list of 1-based option numbers into 0-based indices.
///
/// Entries that aren't numbers or fall outside `1..=count` are dropped;
/// repeated entries keep their first position.
pub fn parse_selection(input: &str, count: usize) -> Vec<usize> {
    let mut selected = Vec::new();
    for entry in input.split(',') {
        let Ok(n) = entry.trim().parse::<usize>() else {
            continue;
        };
        if n == 0 || n > count {
            log::debug!("Option {n} out of range, ignored");
            continue;
        }
        if !selected.contains(&(n - 1)) {
            selected.push(n - 1);
        }
    }
    selected
}

/// List `problems` as numbered options on `out` and read the choice from `input`.
pub fn prompt_selection<R: BufRead, W: Write>(
    problems: &[&str],
    mut input: R,
    mut out: W,
) -> Result<Vec<usize>> {
    writeln!(out, "Available problems:")?;
    for (i, problem) in problems.iter().enumerate() {
        writeln!(out, "Option {}: {problem}", i + 1)?;
    }
    write!(
        out,
        "Enter the option numbers (separated by commas) of the problems you want to plot: "
    )?;
    out.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read selection")?;
    Ok(parse_selection(&line, problems.len()))
}
