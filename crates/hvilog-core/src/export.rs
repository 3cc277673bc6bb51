use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{PipelineError, Result};

/// Write the aggregate table to `path`, with a header row and no index column.
///
/// The format follows the destination extension: `.csv` writes delimited
/// text, anything else writes an xlsx workbook. An empty table is refused
/// with [`PipelineError::NoData`] instead of silently writing an empty file.
pub fn write_spreadsheet(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(PipelineError::NoData);
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => write_csv(df, path)?,
        _ => write_xlsx(df, path)?,
    }

    info!(rows = df.height(), path = %path.display(), "wrote spreadsheet");
    Ok(())
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df.clone())?;
    Ok(())
}

fn write_xlsx(df: &DataFrame, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_index, column) in df.get_columns().iter().enumerate() {
        let col = col_index as u16;
        worksheet.write_string(0, col, column.name().as_str())?;

        for (row_index, value) in column.as_materialized_series().iter().enumerate() {
            let row = row_index as u32 + 1;
            match value {
                AnyValue::Float64(v) => {
                    worksheet.write_number(row, col, v)?;
                }
                AnyValue::Int64(v) => {
                    worksheet.write_number(row, col, v as f64)?;
                }
                AnyValue::String(v) => {
                    worksheet.write_string(row, col, v)?;
                }
                AnyValue::Null => {}
                other => {
                    worksheet.write_string(row, col, other.to_string())?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
