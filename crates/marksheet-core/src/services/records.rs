//! Assembles the render input for one processed row

use crate::config::ResolvedColumns;
use marksheet_types::{CriterionScore, Row, StudentRecord};

/// Build the per-student record from a data row, the max-marks row and
/// the resolved column map.
///
/// Marks are carried as trimmed strings; the max-marks row supplies the
/// denominator for each scored column.
pub fn build_record(row: &Row, max_marks: &Row, columns: &ResolvedColumns) -> StudentRecord {
    let criteria = columns
        .criteria
        .iter()
        .map(|(title, index)| CriterionScore {
            title: title.clone(),
            mark: row.cell(*index).trim().to_string(),
            max: max_marks.cell(*index).trim().to_string(),
        })
        .collect();

    let email = columns
        .email
        .map(|i| row.cell(i).trim().to_string())
        .filter(|e| !e.is_empty());

    StudentRecord {
        number: row.cell(columns.student_number).trim().to_string(),
        first_name: row.cell(columns.first_name).trim().to_string(),
        last_name: row.cell(columns.last_name).trim().to_string(),
        email,
        criteria,
        total: CriterionScore {
            title: "Total".to_string(),
            mark: row.cell(columns.total).trim().to_string(),
            max: max_marks.cell(columns.total).trim().to_string(),
        },
        feedback: row.cell(columns.feedback).trim().to_string(),
    }
}
