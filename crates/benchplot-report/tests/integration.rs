//! End-to-end tests over a full search benchmark report
//!
//! `tests/data/search_report.txt` holds nine algorithm sections with fifteen
//! lines each (fourteen runs plus the `TOTAL` rollup).

use std::path::PathBuf;

use benchplot_report::table::{read_csv, read_parquet};
use benchplot_report::{
    Cost, Metric, distinct_problems, filter_problem, parse_report, parse_report_grouped,
    parse_report_with_stats, summarize, write_csv, write_parquet,
};
use tempfile::TempDir;

const ALGORITHMS: [&str; 9] = [
    "astar_search",
    "uniform_cost_search",
    "breadth_first_search",
    "breadth_first_bfs",
    "iterative_deepening_search",
    "depth_limited_search",
    "greedy_bfs",
    "weighted_astar_search",
    "extra_weighted_astar_search",
];

fn fixture() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/search_report.txt");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
fn parses_every_line() {
    let (records, stats) = parse_report_with_stats(&fixture());
    assert_eq!(records.len(), 135);
    assert_eq!(stats.sections, 9);
    assert_eq!(stats.skipped(), 0);
}

#[test]
fn grouped_matches_sections() {
    let grouped = parse_report_grouped(&fixture());
    assert_eq!(grouped.algorithms().collect::<Vec<_>>(), ALGORITHMS);
    for (algorithm, records) in grouped.iter() {
        assert_eq!(records.len(), 15, "{algorithm}");
        assert!(records.iter().all(|r| r.algorithm == algorithm));
        assert!(records.last().is_some_and(|r| r.is_total()));
    }
}

#[test]
fn flat_equals_grouped_flattened() {
    let text = fixture();
    assert_eq!(parse_report_grouped(&text).into_flat(), parse_report(&text));
}

#[test]
fn first_total_row() {
    let records = parse_report(&fixture());
    let total = records.iter().find(|r| r.is_total()).unwrap();
    assert_eq!(total.algorithm, "astar_search");
    assert_eq!(total.nodes, 18_151);
    assert_eq!(total.goal_checks, 2_096);
    assert_eq!(total.cost, Cost::Finite(2706.0));
    assert_eq!(total.actions, 2_200);
}

#[test]
fn depth_limited_has_unbounded_costs() {
    let records = parse_report(&fixture());
    let unbounded: Vec<_> = records
        .iter()
        .filter(|r| r.cost.is_unbounded())
        .map(|r| (r.algorithm.as_str(), r.problem_label.as_str()))
        .collect();
    assert_eq!(
        unbounded,
        [
            ("depth_limited_search", "PourProblem((0, 0), 8)"),
            ("depth_limited_search", "GreenPourProblem((0, 0), 8)"),
            ("depth_limited_search", "TOTAL"),
        ]
    );
}

#[test]
fn problems_listed_in_first_seen_order() {
    let records = parse_report(&fixture());
    let problems = distinct_problems(&records);
    assert_eq!(problems.len(), 13);
    assert_eq!(problems[0], "PourProblem((1, 1, 1), 13)");
    assert_eq!(problems[11], "EightPuzzle((1, 4, 2, 0, 7, 5, 3, 6, 8),");
    assert_eq!(problems[12], "TOTAL");
}

#[test]
fn route_problem_filter_spans_all_algorithms() {
    let records = parse_report(&fixture());
    let hits = filter_problem(&records, "RouteProblem('A', 'A')");
    assert_eq!(hits.len(), 9);
    let algorithms: Vec<_> = hits.iter().map(|r| r.algorithm.as_str()).collect();
    assert_eq!(algorithms, ALGORITHMS);
    assert!(hits.iter().all(|r| r.nodes == 0 && r.cost == Cost::Finite(0.0)));
}

#[test]
fn csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("output.csv");
    let records = parse_report(&fixture());

    write_csv(&records, &path).unwrap();
    let reloaded = read_csv(&path).unwrap();
    assert_eq!(reloaded, records);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("nodes,goal,cost,actions,problem,search\n"));
    assert!(text.contains("158838,158526,inf,20706,TOTAL,depth_limited_search"));
}

#[test]
fn parquet_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("output.parquet");
    let records = parse_report(&fixture());

    assert_eq!(write_parquet(&records, &path, 3).unwrap(), 135);
    assert_eq!(read_parquet(&path).unwrap(), records);
}

#[test]
fn summary_matches_reported_totals() {
    let summaries = summarize(&parse_report(&fixture()));
    assert_eq!(summaries.len(), 9);
    for summary in &summaries {
        assert_eq!(summary.runs, 14, "{}", summary.algorithm);
        assert!(summary.reported_total.is_some());
    }
    assert_eq!(summaries[5].algorithm, "depth_limited_search");
    assert_eq!(summaries[5].unsolved, 2);
}

#[test]
fn metrics_skip_unbounded_cost_only() {
    let records = parse_report(&fixture());
    let unbounded = records.iter().find(|r| r.cost.is_unbounded()).unwrap();
    assert_eq!(Metric::Cost.value(unbounded), None);
    assert_eq!(Metric::Nodes.value(unbounded), Some(452.0));
}
