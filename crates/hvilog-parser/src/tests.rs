use std::fs;
use std::path::PathBuf;

use crate::errors::ParseError;
use crate::model::{DecodePolicy, ParseReport};
use crate::parse_classing_log;

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn sample_fields() -> Vec<String> {
    [
        "HVI", "08521", "B0001", "0", "448", "753", "130", "133", "030", "020", "1", "0972",
        "767", "236", "0", "070", "070", "N", "N", "0", "0", "000001",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn parse_line(fields: &[String], policy: DecodePolicy) -> ParseReport {
    parse_classing_log(&fields.join("@"), policy).expect("parse failed")
}

#[test]
fn decodes_scaled_numeric_fields() {
    let report = parse_line(&sample_fields(), DecodePolicy::Skip);
    assert_eq!(report.records.len(), 1);

    let record = &report.records[0];
    assert_eq!(record.mic, 4.48);
    assert_eq!(record.rd, 75.3);
    assert_eq!(record.b_plus, 13.0);
    assert_eq!(record.area, 0.30);
    assert_eq!(record.len, 0.972);
    assert_eq!(record.unf, 76.7);
    assert_eq!(record.strength, 23.6);
    assert_eq!(record.sfi, 7.0);
    assert_eq!(record.elg, 7.0);
    assert_eq!(record.cnt, 20);
    assert_eq!(record.trash_leaf, 1);
    assert_eq!(record.line_number, 1);
}

#[test]
fn carries_string_fields_verbatim() {
    let report = parse_line(&sample_fields(), DecodePolicy::Skip);
    let record = &report.records[0];
    assert_eq!(record.testing_mode, "HVI");
    assert_eq!(record.gin_code, "08521");
    assert_eq!(record.bale_number, "B0001");
    assert_eq!(record.retest, "N");
    assert_eq!(record.retest_code, "N");
}

#[test]
fn reformats_color_grade_token() {
    let mut fields = sample_fields();
    fields[7] = "133".to_string();
    let report = parse_line(&fields, DecodePolicy::Skip);
    assert_eq!(report.records[0].color_grade, "13-3");

    fields[7] = "421".to_string();
    let report = parse_line(&fields, DecodePolicy::Skip);
    assert_eq!(report.records[0].color_grade, "42-1");
}

#[test]
fn short_color_grade_token_drops_the_line() {
    let mut fields = sample_fields();
    fields[7] = "13".to_string();
    let report = parse_line(&fields, DecodePolicy::Collect);
    assert!(report.records.is_empty());
    assert_eq!(report.dropped_lines, 1);
    assert_eq!(report.failures[0].field, "color grade");
}

#[test]
fn filters_short_lines_without_error() {
    let content = "HVI@08521@B0001\n";
    let report = parse_classing_log(content, DecodePolicy::Skip).expect("parse failed");
    assert!(report.records.is_empty());
    assert_eq!(report.short_lines, 1);
    assert_eq!(report.dropped_lines, 0);
}

#[test]
fn line_with_exactly_21_fields_passes_shape_filter_but_fails_decode() {
    let fields = sample_fields();
    let report = parse_line(&fields[..21].to_vec(), DecodePolicy::Collect);
    assert!(report.records.is_empty());
    assert_eq!(report.short_lines, 0);
    assert_eq!(report.dropped_lines, 1);
    assert_eq!(report.failures[0].field, "line number");
}

#[test]
fn skip_policy_counts_dropped_lines_only() {
    let mut fields = sample_fields();
    fields[4] = "4X8".to_string();
    let report = parse_line(&fields, DecodePolicy::Skip);
    assert!(report.records.is_empty());
    assert_eq!(report.dropped_lines, 1);
    assert!(report.failures.is_empty());
}

#[test]
fn collect_policy_retains_failure_details() {
    let mut fields = sample_fields();
    fields[4] = "4X8".to_string();
    let report = parse_line(&fields, DecodePolicy::Collect);
    assert_eq!(report.dropped_lines, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].line_index, 0);
    assert_eq!(report.failures[0].field, "mic");
    assert!(report.failures[0].message.contains("4X8"));
}

#[test]
fn abort_policy_fails_the_whole_parse() {
    let mut fields = sample_fields();
    fields[13] = "not-a-number".to_string();
    let err = parse_classing_log(&fields.join("@"), DecodePolicy::Abort)
        .expect_err("expected decode failure");
    match err {
        ParseError::Field { field, .. } => assert_eq!(field, "str"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parses_sample_log_fixture() {
    let content = fixture("classing_sample.log");
    let report = parse_classing_log(&content, DecodePolicy::Skip).expect("parse failed");

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.short_lines, 1);
    assert_eq!(report.dropped_lines, 1);

    let first = &report.records[0];
    assert_eq!(first.bale_number, "B0001");
    assert_eq!(first.mic, 4.48);
    assert_eq!(first.color_grade, "13-3");

    let third = &report.records[2];
    assert_eq!(third.bale_number, "B0002");
    assert_eq!(third.len, 1.015);
    assert_eq!(third.color_grade, "14-2");
}

#[test]
fn parsing_is_deterministic() {
    let content = fixture("classing_sample.log");
    let first = parse_classing_log(&content, DecodePolicy::Collect).expect("parse failed");
    let second = parse_classing_log(&content, DecodePolicy::Collect).expect("parse failed");
    assert_eq!(first, second);
}
