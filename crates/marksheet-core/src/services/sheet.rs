//! Spreadsheet input

use crate::error::{MarksheetError, Result};
use csv::ReaderBuilder;
use marksheet_types::{Row, Sheet};
use std::fs::File;
use std::path::Path;

/// Read a comma-delimited file into an ordered sequence of rows.
///
/// No header semantics: every line is a candidate row, and rows may be
/// ragged (missing trailing cells read back as "").
pub fn load_sheet<P: AsRef<Path>>(path: P) -> Result<Sheet> {
    let file = File::open(path.as_ref()).map_err(|e| {
        MarksheetError::Config(format!(
            "Failed to open spreadsheet {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(Row::new(record.iter().map(str::to_string).collect()));
    }

    log::debug!("Loaded {} rows from {}", rows.len(), path.as_ref().display());
    Ok(Sheet::new(rows))
}

/// Locate the max-marks row at its configured 1-based index.
///
/// Returns the row together with the zero-based index of the first data
/// row (the row immediately after it). A sheet with fewer rows than the
/// index requires is a fatal error.
pub fn max_marks_row(sheet: &Sheet, index_1based: usize) -> Result<(&Row, usize)> {
    if index_1based == 0 || sheet.rows.len() < index_1based {
        return Err(MarksheetError::Config(format!(
            "spreadsheet has {} rows but the max-marks row index is {}",
            sheet.rows.len(),
            index_1based
        )));
    }

    Ok((&sheet.rows[index_1based - 1], index_1based))
}
