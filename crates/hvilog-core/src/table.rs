use polars::prelude::*;

use crate::aggregate::BaleAggregate;

/// Output column order. SCI sits immediately before Mic.
pub const OUTPUT_COLUMNS: [&str; 19] = [
    "Testing Mode",
    "Gin Code",
    "Gin Bale Number",
    "SCI",
    "Mic",
    "Rd",
    "b+",
    "Color Grade",
    "Area",
    "Cnt",
    "T.L",
    "Len",
    "Unf",
    "Str",
    "SFI",
    "ELG",
    "Retest",
    "Retest Code",
    "Line Number",
];

/// Round half away from zero to `places` decimal places.
fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

/// Build the display table from per-bale aggregates, one row per bale.
///
/// This is where the display rounding contract is applied: SCI, Cnt and T.L
/// become whole integers; Mic, Area and Len keep 2 decimal places; the
/// remaining measurements keep 1. The quality index was already computed from
/// the unrounded means, so rounding here cannot leak into it.
pub fn aggregate_table(aggregates: &[BaleAggregate]) -> PolarsResult<DataFrame> {
    let len = aggregates.len();

    let mut testing_mode = Vec::with_capacity(len);
    let mut gin_code = Vec::with_capacity(len);
    let mut bale_number = Vec::with_capacity(len);
    let mut sci = Vec::with_capacity(len);
    let mut mic = Vec::with_capacity(len);
    let mut rd = Vec::with_capacity(len);
    let mut b_plus = Vec::with_capacity(len);
    let mut color_grade = Vec::with_capacity(len);
    let mut area = Vec::with_capacity(len);
    let mut cnt = Vec::with_capacity(len);
    let mut trash_leaf = Vec::with_capacity(len);
    let mut length = Vec::with_capacity(len);
    let mut unf = Vec::with_capacity(len);
    let mut strength = Vec::with_capacity(len);
    let mut sfi = Vec::with_capacity(len);
    let mut elg = Vec::with_capacity(len);
    let mut retest = Vec::with_capacity(len);
    let mut retest_code = Vec::with_capacity(len);
    let mut line_number = Vec::with_capacity(len);

    for bale in aggregates {
        testing_mode.push(bale.testing_mode.clone());
        gin_code.push(bale.gin_code.clone());
        bale_number.push(bale.bale_number.clone());
        sci.push(round_whole(bale.sci));
        mic.push(round_dp(bale.mic, 2));
        rd.push(round_dp(bale.rd, 1));
        b_plus.push(round_dp(bale.b_plus, 1));
        color_grade.push(bale.color_grade.clone());
        area.push(round_dp(bale.area, 2));
        cnt.push(round_whole(bale.cnt));
        trash_leaf.push(round_whole(bale.trash_leaf));
        length.push(round_dp(bale.len, 2));
        unf.push(round_dp(bale.unf, 1));
        strength.push(round_dp(bale.strength, 1));
        sfi.push(round_dp(bale.sfi, 1));
        elg.push(round_dp(bale.elg, 1));
        retest.push(bale.retest.clone());
        retest_code.push(bale.retest_code.clone());
        line_number.push(bale.line_number);
    }

    let columns: Vec<Column> = vec![
        Series::new("Testing Mode".into(), testing_mode).into(),
        Series::new("Gin Code".into(), gin_code).into(),
        Series::new("Gin Bale Number".into(), bale_number).into(),
        Series::new("SCI".into(), sci).into(),
        Series::new("Mic".into(), mic).into(),
        Series::new("Rd".into(), rd).into(),
        Series::new("b+".into(), b_plus).into(),
        Series::new("Color Grade".into(), color_grade).into(),
        Series::new("Area".into(), area).into(),
        Series::new("Cnt".into(), cnt).into(),
        Series::new("T.L".into(), trash_leaf).into(),
        Series::new("Len".into(), length).into(),
        Series::new("Unf".into(), unf).into(),
        Series::new("Str".into(), strength).into(),
        Series::new("SFI".into(), sfi).into(),
        Series::new("ELG".into(), elg).into(),
        Series::new("Retest".into(), retest).into(),
        Series::new("Retest Code".into(), retest_code).into(),
        Series::new("Line Number".into(), line_number).into(),
    ];

    DataFrame::new(columns)
}
