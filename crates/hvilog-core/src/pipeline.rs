use std::fs;
use std::path::Path;

use hvilog_parser::{parse_classing_log, DecodePolicy, ParseReport};
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::aggregate::{aggregate_bales, BaleAggregate};
use crate::error::Result;
use crate::table::aggregate_table;

/// Everything the pipeline produced for one log file.
pub struct PipelineOutput {
    /// Display table, one row per bale, columns per [`crate::OUTPUT_COLUMNS`].
    pub table: DataFrame,
    /// Full-precision aggregates backing the table.
    pub aggregates: Vec<BaleAggregate>,
    /// Parse diagnostics, including dropped-line counts.
    pub report: ParseReport,
}

/// Run the whole log-to-aggregate pipeline over in-memory log content.
///
/// Single pass, synchronous, stateless: running this twice on the same
/// content yields identical tables.
pub fn process_log(content: &str, policy: DecodePolicy) -> Result<PipelineOutput> {
    let report = parse_classing_log(content, policy)?;
    if report.short_lines > 0 || report.dropped_lines > 0 {
        warn!(
            short_lines = report.short_lines,
            dropped_lines = report.dropped_lines,
            "discarded malformed log lines"
        );
    }

    let aggregates = aggregate_bales(&report.records);
    let table = aggregate_table(&aggregates)?;
    info!(
        records = report.records.len(),
        bales = aggregates.len(),
        "aggregated classing log"
    );

    Ok(PipelineOutput {
        table,
        aggregates,
        report,
    })
}

/// Read the log file at `path` into memory and run [`process_log`] on it.
pub fn process_log_file(path: &Path, policy: DecodePolicy) -> Result<PipelineOutput> {
    let content = fs::read_to_string(path)?;
    process_log(&content, policy)
}
