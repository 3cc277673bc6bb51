use csv::{ReaderBuilder, StringRecord};

use crate::errors::ParseError;
use crate::model::{ClassingRecord, DecodeFailure, DecodePolicy, ParseReport};

/// Fields in a classing log line are separated by a literal `@`.
pub const FIELD_DELIMITER: u8 = b'@';

/// Lines with fewer fields than this are filtered out before decoding.
pub const MIN_FIELDS: usize = 21;

/// Parse the full text content of a classing log.
///
/// Short lines are filtered (counted, never errors); lines that fail field
/// decoding are handled per `policy`. Decoding is pure: the same content and
/// policy always produce the same report.
pub fn parse_classing_log(content: &str, policy: DecodePolicy) -> Result<ParseReport, ParseError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let mut report = ParseReport::default();

    for (line_index, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() < MIN_FIELDS {
            report.short_lines += 1;
            continue;
        }

        match decode_record(line_index, &row) {
            Ok(record) => report.records.push(record),
            Err(err) => match policy {
                DecodePolicy::Abort => return Err(err),
                DecodePolicy::Skip => report.dropped_lines += 1,
                DecodePolicy::Collect => {
                    report.dropped_lines += 1;
                    if let ParseError::Field {
                        line_index,
                        field,
                        message,
                    } = err
                    {
                        report.failures.push(DecodeFailure {
                            line_index,
                            field,
                            message,
                        });
                    }
                }
            },
        }
    }

    Ok(report)
}

/// Decode one line with at least [`MIN_FIELDS`] fields into a [`ClassingRecord`].
///
/// Numeric fields are stored in the log as unscaled integers (`448` means
/// `4.48`), so decoding is integer-parse-then-divide rather than a decimal
/// parse.
pub fn decode_record(line_index: usize, row: &StringRecord) -> Result<ClassingRecord, ParseError> {
    Ok(ClassingRecord {
        testing_mode: verbatim(row, 0),
        gin_code: verbatim(row, 1),
        bale_number: verbatim(row, 2),
        mic: scaled_field(line_index, row, 4, "mic", 100)?,
        rd: scaled_field(line_index, row, 5, "rd", 10)?,
        b_plus: scaled_field(line_index, row, 6, "b+", 10)?,
        color_grade: color_grade_field(line_index, row, 7)?,
        area: scaled_field(line_index, row, 8, "area", 100)?,
        cnt: integer_field(line_index, row, 9, "cnt")?,
        trash_leaf: integer_field(line_index, row, 10, "t.l")?,
        len: scaled_field(line_index, row, 11, "len", 1000)?,
        unf: scaled_field(line_index, row, 12, "unf", 10)?,
        strength: scaled_field(line_index, row, 13, "str", 10)?,
        sfi: scaled_field(line_index, row, 15, "sfi", 10)?,
        elg: scaled_field(line_index, row, 16, "elg", 10)?,
        retest: verbatim(row, 17),
        retest_code: verbatim(row, 18),
        line_number: integer_field(line_index, row, 21, "line number")?,
    })
}

fn verbatim(row: &StringRecord, index: usize) -> String {
    // Indices below MIN_FIELDS are guaranteed present by the shape filter.
    row.get(index).unwrap_or_default().to_string()
}

fn raw_field<'a>(
    line_index: usize,
    row: &'a StringRecord,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    row.get(index).ok_or_else(|| {
        ParseError::field(line_index, field, format!("missing field at index {index}"))
    })
}

fn integer_field(
    line_index: usize,
    row: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<i64, ParseError> {
    let raw = raw_field(line_index, row, index, field)?;
    raw.trim().parse::<i64>().map_err(|err| {
        ParseError::field(line_index, field, format!("invalid integer '{raw}': {err}"))
    })
}

fn scaled_field(
    line_index: usize,
    row: &StringRecord,
    index: usize,
    field: &'static str,
    divisor: i64,
) -> Result<f64, ParseError> {
    let value = integer_field(line_index, row, index, field)?;
    Ok(value as f64 / divisor as f64)
}

/// A 3-character raw code `ABC` becomes `AB-C`, e.g. `133` -> `13-3`.
fn color_grade_field(
    line_index: usize,
    row: &StringRecord,
    index: usize,
) -> Result<String, ParseError> {
    let raw = raw_field(line_index, row, index, "color grade")?;
    let mut chars = raw.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), Some(second), Some(third)) => Ok(format!("{first}{second}-{third}")),
        _ => Err(ParseError::field(
            line_index,
            "color grade",
            format!("token '{raw}' has fewer than 3 characters"),
        )),
    }
}
