// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use phrase_search_core::count_matrix::{CountMatrix, MatrixShape};
use phrase_search_core::report::SearchReport;
use serde_json::Value;

fn example_report() -> SearchReport {
    let matrix = CountMatrix::from_cells(MatrixShape::new(2, 2), vec![2, 1, 0, 2]).unwrap();
    SearchReport::new(
        vec!["example".to_string(), "text".to_string()],
        vec!["A".to_string(), "B".to_string()],
        matrix,
    )
}

#[test]
fn test_totals() {
    let report = example_report();
    assert_eq!(report.file_totals(), vec![("A", 3), ("B", 2)]);
    assert_eq!(report.term_totals(), vec![("example", 2), ("text", 3)]);
    assert_eq!(report.grand_total(), 5);
    assert_eq!(report.count("A", "example"), Some(2));
    assert_eq!(report.count("B", "text"), Some(2));
    assert_eq!(report.count("C", "text"), None);
    assert_eq!(report.count("A", "missing"), None);
}

#[test]
fn test_render_text() {
    let report = example_report();
    assert_eq!(report.render_text(false), "A: 3\nB: 2\n");
    assert_eq!(
        report.render_text(true),
        "A: 3\n  example: 2\n  text: 1\nB: 2\n  example: 0\n  text: 2\n"
    );
}

#[test]
fn test_render_text_without_terms_lists_zero_totals() {
    let report = SearchReport::new(
        Vec::new(),
        vec!["A".to_string()],
        CountMatrix::zeroed(MatrixShape::new(1, 0)),
    );
    assert_eq!(report.render_text(true), "A: 0\n");
}

#[test]
fn test_json_layout() {
    let json: Value = serde_json::from_str(&example_report().to_json().unwrap()).unwrap();
    assert_eq!(json["terms"], serde_json::json!(["example", "text"]));
    assert_eq!(json["total"], 5);
    assert_eq!(json["files"][0]["path"], "A");
    assert_eq!(json["files"][0]["total"], 3);
    assert_eq!(json["files"][1]["counts"][1]["term"], "text");
    assert_eq!(json["files"][1]["counts"][1]["count"], 2);
}
