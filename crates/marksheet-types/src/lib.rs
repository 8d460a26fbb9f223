//! Shared types for the marksheet batch pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One record from the spreadsheet input, as an ordered list of cell strings.
///
/// Rows are positional and immutable once read. CSV rows can be ragged, so
/// out-of-range cell access yields the empty string instead of panicking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, or "" when the row is shorter than that.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<&str>> for Row {
    fn from(cells: Vec<&str>) -> Self {
        Self::new(cells.into_iter().map(str::to_string).collect())
    }
}

/// The full spreadsheet: an ordered sequence of rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Delivery mode selected on the command line.
///
/// 0 = no delivery, 1 = every message addressed to the coordinator,
/// 2 = messages addressed to each student's own email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailMode {
    Off,
    Coordinator,
    Students,
}

/// Error for an unrecognized `--mail` value
#[derive(Debug, thiserror::Error)]
#[error("invalid mail mode '{0}' (expected 0, 1 or 2)")]
pub struct MailModeParseError(pub String);

impl MailMode {
    pub fn from_flag(value: &str) -> Result<Self, MailModeParseError> {
        match value.trim() {
            "0" => Ok(MailMode::Off),
            "1" => Ok(MailMode::Coordinator),
            "2" => Ok(MailMode::Students),
            other => Err(MailModeParseError(other.to_string())),
        }
    }

    /// Whether any delivery happens in this mode
    pub fn is_enabled(self) -> bool {
        !matches!(self, MailMode::Off)
    }
}

/// Why a row was skipped rather than processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    StudentNumber,
    Email,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            SkipReason::StudentNumber => "invalid student number",
            SkipReason::Email => "invalid email address",
        }
    }
}

/// Routing decision for a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Wholly blank row: no output at all, not even a log line
    Ignore,
    SkipInvalid(SkipReason),
    /// Valid row excluded by the `--ids` inclusion filter
    SkipFiltered,
    Process,
}

/// One scored criterion: the student's mark next to the maximum for it.
///
/// Marks stay strings end to end; the spreadsheet is the source of truth
/// and values like "7.5" or an empty cell are rendered verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub title: String,
    pub mark: String,
    pub max: String,
}

/// Per-student data extracted from one processed row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub criteria: Vec<CriterionScore>,
    pub total: CriterionScore,
    pub feedback: String,
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Artifact filename for this student under the given assignment name
    pub fn artifact_name(&self, assignment: &str) -> String {
        format!("{} - {}.pdf", assignment, self.number)
    }
}

/// A rendered document artifact: where it was written and its raw bytes.
/// The bytes are kept so delivery can attach them without re-reading.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Outcome of a completed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub mode: MailMode,
    pub succeeded: usize,
}

impl BatchSummary {
    /// The single terminal summary line for this run
    pub fn line(&self) -> String {
        let n = self.succeeded;
        let noun = if n == 1 { "student" } else { "students" };
        match self.mode {
            MailMode::Off => format!("Generated PDFs for {} {}.", n, noun),
            MailMode::Students => format!("Sent email to {} {}.", n, noun),
            MailMode::Coordinator => {
                format!("Sent test emails relating to {} {}.", n, noun)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_cell_out_of_range_is_empty() {
        let row = Row::from(vec!["a", "b"]);
        assert_eq!(row.cell(0), "a");
        assert_eq!(row.cell(1), "b");
        assert_eq!(row.cell(2), "");
        assert_eq!(row.cell(100), "");
    }

    #[test]
    fn test_mail_mode_from_flag() {
        assert_eq!(MailMode::from_flag("0").unwrap(), MailMode::Off);
        assert_eq!(MailMode::from_flag("1").unwrap(), MailMode::Coordinator);
        assert_eq!(MailMode::from_flag("2").unwrap(), MailMode::Students);
        assert!(MailMode::from_flag("3").is_err());
        assert!(MailMode::from_flag("").is_err());
        assert!(!MailMode::Off.is_enabled());
        assert!(MailMode::Coordinator.is_enabled());
        assert!(MailMode::Students.is_enabled());
    }

    #[test]
    fn test_artifact_name() {
        let record = StudentRecord {
            number: "12345678".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: None,
            criteria: vec![],
            total: CriterionScore {
                title: "Total".to_string(),
                mark: "18".to_string(),
                max: "20".to_string(),
            },
            feedback: String::new(),
        };
        assert_eq!(
            record.artifact_name("Assignment 1"),
            "Assignment 1 - 12345678.pdf"
        );
        assert_eq!(record.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_summary_line_pluralization() {
        let one = BatchSummary { mode: MailMode::Off, succeeded: 1 };
        assert_eq!(one.line(), "Generated PDFs for 1 student.");

        let many = BatchSummary { mode: MailMode::Off, succeeded: 3 };
        assert_eq!(many.line(), "Generated PDFs for 3 students.");

        let sent = BatchSummary { mode: MailMode::Students, succeeded: 2 };
        assert_eq!(sent.line(), "Sent email to 2 students.");

        let test = BatchSummary { mode: MailMode::Coordinator, succeeded: 1 };
        assert_eq!(test.line(), "Sent test emails relating to 1 student.");
    }

    #[test]
    fn test_skip_reason_descriptions() {
        assert_eq!(SkipReason::StudentNumber.describe(), "invalid student number");
        assert_eq!(SkipReason::Email.describe(), "invalid email address");
    }
}
