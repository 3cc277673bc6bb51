use serde::{Deserialize, Serialize};

/// One decoded measurement line from an HVI classing log.
///
/// Raw lines carry their meaning purely by field position; this struct names
/// every field that is actually consumed. Raw indices 3, 14, 19 and 20 are
/// intentional skips in the instrument format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassingRecord {
    pub testing_mode: String,
    pub gin_code: String,
    /// Aggregation key; compared by exact string equality.
    pub bale_number: String,
    pub mic: f64,
    pub rd: f64,
    pub b_plus: f64,
    /// Reformatted grade-subgrade code, e.g. "133" -> "13-3".
    pub color_grade: String,
    pub area: f64,
    pub cnt: i64,
    pub trash_leaf: i64,
    pub len: f64,
    pub unf: f64,
    pub strength: f64,
    pub sfi: f64,
    pub elg: f64,
    pub retest: String,
    pub retest_code: String,
    pub line_number: i64,
}

/// What to do with a line whose shape is fine but whose fields fail to decode.
///
/// `Skip` reproduces the instrument software's historical behavior: the line
/// vanishes and only a count remains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    #[default]
    Skip,
    Collect,
    Abort,
}

/// A single line dropped under [`DecodePolicy::Collect`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeFailure {
    pub line_index: usize,
    pub field: &'static str,
    pub message: String,
}

/// Outcome of parsing one log file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseReport {
    pub records: Vec<ClassingRecord>,
    /// Lines filtered for having fewer than [`crate::MIN_FIELDS`] fields.
    pub short_lines: usize,
    /// Lines dropped because a field failed to decode.
    pub dropped_lines: usize,
    /// Populated only under [`DecodePolicy::Collect`].
    pub failures: Vec<DecodeFailure>,
}
