//! Error types for the marksheet pipeline

use thiserror::Error;

/// Main error type for all marksheet operations.
///
/// `Config`, `InvalidColumnReference`, `Io`, `Csv` and `Json` surface
/// during startup and abort the run before any output is produced.
/// `Render` and `Delivery` are per-row failures; the batch runner logs
/// them and moves on to the next row.
#[derive(Error, Debug)]
pub enum MarksheetError {
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid column reference '{0}'")]
    InvalidColumnReference(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Document rendering failed: {0}")]
    Render(String),

    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Result type for marksheet operations
pub type Result<T> = std::result::Result<T, MarksheetError>;
