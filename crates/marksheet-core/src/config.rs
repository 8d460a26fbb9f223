//! Configuration management for the marksheet pipeline

use crate::columns::column_index;
use crate::error::{MarksheetError, Result};
use marksheet_types::MailMode;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure, loaded from a JSON document.
///
/// Parsed once at startup and validated for the selected mail mode
/// before the batch begins; every later component works from the
/// validated form.
#[derive(Debug, Clone, Deserialize)]
pub struct MarksheetConfig {
    /// Assignment name; also the prefix of every artifact filename
    pub assignment: String,

    /// Coordinator name printed on each document
    pub coordinator: String,

    /// Lines printed at the top of each document
    #[serde(default)]
    pub header: Vec<String>,

    /// Lines printed at the bottom of each document
    #[serde(default)]
    pub footer: Vec<String>,

    /// 1-based row index of the max-marks row; student rows follow it
    pub max_marks_row: usize,

    pub columns: ColumnsConfig,

    /// Required only when mailing is enabled
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

/// Logical field name to spreadsheet column reference mapping
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsConfig {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,

    /// Student email column; required only when mailing is enabled
    #[serde(default)]
    pub email: Option<String>,

    pub criteria: Vec<CriterionColumn>,
    pub total: String,
    pub feedback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CriterionColumn {
    pub title: String,
    pub column: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub coordinator_email: String,
    pub subject: String,

    #[serde(default)]
    pub body: Vec<String>,

    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    pub username: String,
    pub password: String,
}

fn default_smtp_port() -> u16 {
    587
}

/// Column references resolved to zero-based cell indices.
///
/// Produced once at startup; resolution failure is a fatal
/// configuration error, never a per-row error.
#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    pub student_number: usize,
    pub first_name: usize,
    pub last_name: usize,
    pub email: Option<usize>,
    pub criteria: Vec<(String, usize)>,
    pub total: usize,
    pub feedback: usize,
}

impl ColumnsConfig {
    /// Resolve every configured reference to a cell index
    pub fn resolve(&self) -> Result<ResolvedColumns> {
        let criteria = self
            .criteria
            .iter()
            .map(|c| Ok((c.title.clone(), column_index(&c.column)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedColumns {
            student_number: column_index(&self.student_number)?,
            first_name: column_index(&self.first_name)?,
            last_name: column_index(&self.last_name)?,
            email: self.email.as_deref().map(column_index).transpose()?,
            criteria,
            total: column_index(&self.total)?,
            feedback: column_index(&self.feedback)?,
        })
    }
}

impl MarksheetConfig {
    /// Load configuration from a JSON file and validate it for `mode`
    pub fn from_file<P: AsRef<Path>>(path: P, mode: MailMode) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            MarksheetError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json_str(&content, mode)
    }

    /// Load configuration from a JSON string and validate it for `mode`
    pub fn from_json_str(json: &str, mode: MailMode) -> Result<Self> {
        let config: MarksheetConfig = serde_json::from_str(json)
            .map_err(|e| MarksheetError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate(mode)?;
        Ok(config)
    }

    /// Validate the configuration for the selected mail mode
    pub fn validate(&self, mode: MailMode) -> Result<()> {
        if self.assignment.trim().is_empty() {
            return Err(MarksheetError::Config(
                "assignment name is required".to_string(),
            ));
        }

        if self.coordinator.trim().is_empty() {
            return Err(MarksheetError::Config(
                "coordinator name is required".to_string(),
            ));
        }

        if self.max_marks_row == 0 {
            return Err(MarksheetError::Config(
                "max_marks_row is 1-based and must be at least 1".to_string(),
            ));
        }

        if self.columns.criteria.is_empty() {
            return Err(MarksheetError::Config(
                "columns.criteria must list at least one criterion".to_string(),
            ));
        }

        // Surfaces malformed references before any row is touched
        self.columns.resolve()?;

        if mode.is_enabled() {
            let mail = self.mail.as_ref().ok_or_else(|| {
                MarksheetError::Config(
                    "mail section is required when mailing is enabled".to_string(),
                )
            })?;

            if !mail.coordinator_email.contains('@') {
                return Err(MarksheetError::Config(format!(
                    "mail.coordinator_email '{}' is not an email address",
                    mail.coordinator_email
                )));
            }

            if mail.subject.trim().is_empty() {
                return Err(MarksheetError::Config(
                    "mail.subject is required when mailing is enabled".to_string(),
                ));
            }

            if mail.smtp.host.is_empty()
                || mail.smtp.username.is_empty()
                || mail.smtp.password.is_empty()
            {
                return Err(MarksheetError::Config(
                    "mail.smtp requires host, username and password".to_string(),
                ));
            }

            if self.columns.email.is_none() {
                return Err(MarksheetError::Config(
                    "columns.email is required when mailing is enabled".to_string(),
                ));
            }
        }

        Ok(())
    }
}
