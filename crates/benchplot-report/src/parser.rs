//! Sectioned benchmark report parser
//!
//! Input shape:
//!
//! ```text
//! astar_search:
//!       948 nodes |      109 goal |    4 cost |     112 actions | PourProblem((1, 1, 1), 13)
//!    18,151 nodes |    2,096 goal | 2706 cost |   2,200 actions | TOTAL
//! ```
//!
//! A line ending in `:` opens a section; every data line after it is tagged with
//! the section name. Lines that don't parse are dropped, never reported as errors.

use std::fmt;

use crate::grouped::Grouped;
use crate::record::{Cost, Record};

/// Fields in a data line; anything past the fourth `|` belongs to the label.
const FIELD_COUNT: usize = 5;

/// Why a data line was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Fewer than five `|`-separated fields
    FieldCount(usize),
    /// A count field (`nodes`, `goal`, `actions`) is not an integer
    Count { unit: &'static str, text: String },
    /// The cost field has no token
    MissingCost,
    /// The cost token is neither `inf` nor a number
    Cost(String),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected {FIELD_COUNT} fields, found {n}"),
            Self::Count { unit, text } => write!(f, "bad {unit} count {text:?}"),
            Self::MissingCost => f.write_str("empty cost field"),
            Self::Cost(text) => write!(f, "bad cost {text:?}"),
        }
    }
}

impl std::error::Error for LineError {}

/// Counters from one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines_scanned: usize,
    pub sections: usize,
    pub records: usize,
    /// Data lines inside a section that failed to parse
    pub malformed: usize,
    /// Non-blank lines before any section header
    pub orphaned: usize,
}

impl ParseStats {
    pub fn skipped(&self) -> usize {
        self.malformed + self.orphaned
    }

    pub fn log(&self) {
        log::info!(
            "Parsed {} records in {} sections ({} lines, {} skipped)",
            self.records,
            self.sections,
            self.lines_scanned,
            self.skipped()
        );
    }
}

/// Parse a report into records in source order (flat mode).
pub fn parse_report(text: &str) -> Vec<Record> {
    parse_report_with_stats(text).0
}

/// Parse a report, also returning line counters.
pub fn parse_report_with_stats(text: &str) -> (Vec<Record>, ParseStats) {
    let mut records = Vec::new();
    let stats = scan(text, |event| {
        if let Event::Record(record) = event {
            records.push(record);
        }
    });
    (records, stats)
}

/// Parse a report into per-section buckets (grouped mode).
///
/// Sections keep first-seen order; a repeated header keeps appending to its bucket.
/// A header with no valid lines still gets an empty bucket.
pub fn parse_report_grouped(text: &str) -> Grouped {
    let mut grouped = Grouped::new();
    scan(text, |event| match event {
        Event::Section(name) => grouped.open(name),
        Event::Record(record) => grouped.push(record),
    });
    grouped
}

enum Event<'a> {
    Section(&'a str),
    Record(Record),
}

/// Single pass over the report, reporting headers and records in source order.
fn scan<'a>(text: &'a str, mut emit: impl FnMut(Event<'a>)) -> ParseStats {
    let mut stats = ParseStats::default();
    let mut current: Option<&str> = None;

    for (idx, raw) in text.trim().lines().enumerate() {
        stats.lines_scanned += 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_suffix(':') {
            // a bare ":" leaves no usable section name
            current = (!name.is_empty()).then_some(name);
            if let Some(name) = current {
                stats.sections += 1;
                emit(Event::Section(name));
            }
            continue;
        }

        let Some(algorithm) = current else {
            stats.orphaned += 1;
            log::debug!("line {}: outside any section, skipped", idx + 1);
            continue;
        };

        match parse_data_line(line, algorithm) {
            Ok(record) => {
                stats.records += 1;
                emit(Event::Record(record));
            }
            Err(e) => {
                stats.malformed += 1;
                log::debug!("line {}: {e}, skipped", idx + 1);
            }
        }
    }

    stats
}

/// Parse one `<n> nodes | <n> goal | <cost> cost | <n> actions | <label>` line.
///
/// All four numbers must convert or the whole line is rejected.
pub fn parse_data_line(line: &str, algorithm: &str) -> Result<Record, LineError> {
    let fields: Vec<&str> = line.splitn(FIELD_COUNT, '|').collect();
    if fields.len() < FIELD_COUNT {
        return Err(LineError::FieldCount(fields.len()));
    }

    Ok(Record {
        nodes: parse_count(fields[0], "nodes")?,
        goal_checks: parse_count(fields[1], "goal")?,
        cost: parse_cost(fields[2])?,
        actions: parse_count(fields[3], "actions")?,
        problem_label: fields[4].trim().to_string(),
        algorithm: algorithm.to_string(),
    })
}

/// Trim, then drop a trailing unit word (`1,696 nodes` → `1,696`).
fn strip_unit<'a>(field: &'a str, unit: &str) -> &'a str {
    let field = field.trim();
    field.strip_suffix(unit).map_or(field, str::trim_end)
}

fn parse_count(field: &str, unit: &'static str) -> Result<u64, LineError> {
    let text = strip_unit(field, unit);
    text.replace(',', "")
        .parse()
        .map_err(|_| LineError::Count {
            unit,
            text: text.to_string(),
        })
}

fn parse_cost(field: &str) -> Result<Cost, LineError> {
    let token = strip_unit(field, "cost")
        .split_whitespace()
        .next()
        .ok_or(LineError::MissingCost)?;
    token
        .parse()
        .map_err(|_| LineError::Cost(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE_LINE: &str =
        "       15 nodes |        6 goal |  418 cost |       9 actions | RouteProblem('A', 'B')";

    #[test]
    fn single_record_scenario() {
        let records = parse_report("foo:\n  5 nodes |  2 goal |  3 cost |  4 actions | X\n");
        assert_eq!(
            records,
            vec![Record {
                nodes: 5,
                goal_checks: 2,
                cost: Cost::Finite(3.0),
                actions: 4,
                problem_label: "X".to_string(),
                algorithm: "foo".to_string(),
            }]
        );
    }

    #[test]
    fn inf_cost_is_unbounded() {
        let records = parse_report("foo:\n  5 nodes |  2 goal |  inf cost |  4 actions | X\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cost, Cost::Unbounded);
    }

    #[test]
    fn thousands_separators_stripped() {
        let line = "   18,151 nodes |    2,096 goal | 2706 cost |   2,200 actions | TOTAL";
        let record = parse_data_line(line, "astar_search").unwrap();
        assert_eq!(record.nodes, 18_151);
        assert_eq!(record.goal_checks, 2_096);
        assert_eq!(record.cost, Cost::Finite(2706.0));
        assert_eq!(record.actions, 2_200);
    }

    #[test]
    fn total_row_is_an_ordinary_record() {
        let line = "  158,838 nodes |  158,526 goal |  inf cost |  20,706 actions | TOTAL";
        let record = parse_data_line(line, "depth_limited_search").unwrap();
        assert!(record.is_total());
        assert_eq!(record.cost, Cost::Unbounded);
    }

    #[test]
    fn four_fields_dropped() {
        let err = parse_data_line("5 nodes | 2 goal | 3 cost | 4 actions", "foo").unwrap_err();
        assert_eq!(err, LineError::FieldCount(4));
        assert!(parse_report("foo:\n5 nodes | 2 goal | 3 cost | 4 actions\n").is_empty());
    }

    #[test]
    fn non_numeric_first_field_drops_whole_line() {
        let text = "foo:\n  5x nodes |  2 goal |  3 cost |  4 actions | X\n";
        let (records, stats) = parse_report_with_stats(text);
        assert!(records.is_empty());
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn bad_later_field_drops_whole_line() {
        assert!(matches!(
            parse_data_line("5 nodes | 2 goal | 3 cost | many actions | X", "foo"),
            Err(LineError::Count { unit: "actions", .. })
        ));
        assert_eq!(
            parse_data_line("5 nodes | 2 goal | cheap cost | 4 actions | X", "foo"),
            Err(LineError::Cost("cheap".to_string()))
        );
        assert_eq!(
            parse_data_line("5 nodes | 2 goal |  cost | 4 actions | X", "foo"),
            Err(LineError::MissingCost)
        );
    }

    #[test]
    fn cost_uses_first_token() {
        let record = parse_data_line("1 nodes | 1 goal | 7 cost extra | 1 actions | X", "a").unwrap();
        assert_eq!(record.cost, Cost::Finite(7.0));
    }

    #[test]
    fn label_keeps_extra_pipes() {
        let record = parse_data_line("1 nodes | 1 goal | 1 cost | 1 actions | A | B ", "a").unwrap();
        assert_eq!(record.problem_label, "A | B");
    }

    #[test]
    fn truncated_label_kept_verbatim() {
        let line = "15 nodes | 6 goal | 5 cost | 10 actions | EightPuzzle((1, 4, 2, 0, 7, 5, 3, 6, 8),";
        let record = parse_data_line(line, "astar_search").unwrap();
        assert_eq!(record.problem_label, "EightPuzzle((1, 4, 2, 0, 7, 5, 3, 6, 8),");
    }

    #[test]
    fn line_before_header_dropped() {
        let (records, stats) = parse_report_with_stats(ROUTE_LINE);
        assert!(records.is_empty());
        assert_eq!(stats.orphaned, 1);
    }

    #[test]
    fn records_inherit_section_name() {
        let text = format!("astar_search:\n{ROUTE_LINE}\n\ngreedy_bfs:\n{ROUTE_LINE}\n{ROUTE_LINE}\n");
        let records = parse_report(&text);
        let algorithms: Vec<_> = records.iter().map(|r| r.algorithm.as_str()).collect();
        assert_eq!(algorithms, ["astar_search", "greedy_bfs", "greedy_bfs"]);
    }

    #[test]
    fn repeated_section_accumulates() {
        let text = format!("a:\n{ROUTE_LINE}\n{ROUTE_LINE}\nb:\n{ROUTE_LINE}\na:\n{ROUTE_LINE}\n");
        let records = parse_report(&text);
        assert_eq!(records.iter().filter(|r| r.algorithm == "a").count(), 3);

        let grouped = parse_report_grouped(&text);
        assert_eq!(grouped.algorithms().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(grouped.get("a").map(<[Record]>::len), Some(3));
        assert_eq!(grouped.get("b").map(<[Record]>::len), Some(1));
    }

    #[test]
    fn grouped_keeps_empty_sections() {
        let grouped = parse_report_grouped("empty:\n\nfull:\n5 nodes | 2 goal | 3 cost | 4 actions | X\n");
        assert_eq!(grouped.algorithms().collect::<Vec<_>>(), ["empty", "full"]);
        assert_eq!(grouped.get("empty").map(<[Record]>::len), Some(0));
        assert_eq!(grouped.record_count(), 1);
    }

    #[test]
    fn bare_colon_clears_section() {
        let text = format!("a:\n{ROUTE_LINE}\n:\n{ROUTE_LINE}\n");
        let (records, stats) = parse_report_with_stats(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(stats.orphaned, 1);
        assert_eq!(stats.sections, 1);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse_report("").is_empty());
        assert!(parse_report("\n   \n\t\n").is_empty());
        assert!(parse_report_grouped("").is_empty());
    }

    #[test]
    fn stats_count_lines() {
        let text = "junk\na:\n\n5 nodes | 2 goal | 3 cost | 4 actions | X\nbroken line\n";
        let (_, stats) = parse_report_with_stats(text);
        assert_eq!(
            stats,
            ParseStats {
                lines_scanned: 5,
                sections: 1,
                records: 1,
                malformed: 1,
                orphaned: 1,
            }
        );
        assert_eq!(stats.skipped(), 2);
    }

    #[test]
    fn crlf_lines_parse() {
        let records = parse_report("a:\r\n5 nodes | 2 goal | 3 cost | 4 actions | X\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].problem_label, "X");
    }
}
