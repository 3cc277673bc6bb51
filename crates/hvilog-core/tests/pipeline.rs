use hvilog_core::{process_log, DecodePolicy, OUTPUT_COLUMNS};

const SAMPLE_LOG: &str = "\
HVI@08521@B0001@0@440@753@130@133@030@020@1@0972@767@236@0@070@070@N@N@0@0@000001
HVI@08521@B0001@0@460@753@130@142@030@020@1@0972@767@236@0@070@070@N@N@0@0@000002
HVI@08521@B0002@0@512@741@128@142@035@018@0@1015@781@251@0@065@072@N@N@0@0@000003
short@line
HVI@08521@B0003@0@4X8@753@130@133@030@020@1@0972@767@236@0@070@070@N@N@0@0@000005
";

#[test]
fn produces_one_row_per_bale_in_first_seen_order() {
    let output = process_log(SAMPLE_LOG, DecodePolicy::Skip).expect("pipeline failed");

    assert_eq!(output.table.height(), 2);
    assert_eq!(output.table.get_column_names_str(), OUTPUT_COLUMNS);

    let bales = output.table.column("Gin Bale Number").unwrap();
    let bales = bales.str().unwrap();
    assert_eq!(bales.get(0), Some("B0001"));
    assert_eq!(bales.get(1), Some("B0002"));

    let mic = output.table.column("Mic").unwrap().f64().unwrap();
    assert_eq!(mic.get(0), Some(4.50));

    // Tie between "13-3" and "14-2" resolves to the earliest value.
    let grade = output.table.column("Color Grade").unwrap().str().unwrap();
    assert_eq!(grade.get(0), Some("13-3"));
}

#[test]
fn reports_discarded_lines() {
    let output = process_log(SAMPLE_LOG, DecodePolicy::Collect).expect("pipeline failed");

    assert_eq!(output.report.short_lines, 1);
    assert_eq!(output.report.dropped_lines, 1);
    assert_eq!(output.report.failures.len(), 1);
    assert_eq!(output.report.failures[0].field, "mic");
}

#[test]
fn sci_is_computed_from_unrounded_means() {
    let output = process_log(SAMPLE_LOG, DecodePolicy::Skip).expect("pipeline failed");

    // B0001 means: Str=23.6 Mic=4.50 Len=0.972 Unf=76.7 Rd=75.3 b+=13.0
    let expected = -414.67 + 2.9 * 23.6 - 9.32 * 4.50 + 49.17 * 0.972 + 4.74 * 76.7
        + 0.65 * 75.3
        + 0.36 * 13.0;
    assert!((output.aggregates[0].sci - expected).abs() < 1e-9);

    let sci = output.table.column("SCI").unwrap().i64().unwrap();
    assert_eq!(sci.get(0), Some(expected.round() as i64));
}

#[test]
fn pipeline_is_idempotent() {
    let first = process_log(SAMPLE_LOG, DecodePolicy::Skip).expect("pipeline failed");
    let second = process_log(SAMPLE_LOG, DecodePolicy::Skip).expect("pipeline failed");

    assert_eq!(first.aggregates, second.aggregates);
    assert!(first.table.equals(&second.table));
}

#[test]
fn empty_input_yields_an_empty_table() {
    let output = process_log("", DecodePolicy::Skip).expect("pipeline failed");
    assert_eq!(output.table.height(), 0);
    assert!(output.aggregates.is_empty());
}
