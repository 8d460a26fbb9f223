//! The sequencer: drives rows one at a time through classify, render
//! and deliver, in strict ascending order with pacing between units.

use super::traits::BatchSteps;
use crate::config::ResolvedColumns;
use crate::constants::{DELIVER_PAUSE_MS, RENDER_PAUSE_MS};
use crate::runlog::RunLog;
use crate::services::classifier::classify;
use crate::services::records::build_record;
use marksheet_types::{BatchSummary, Classification, MailMode, Row, Sheet};
use std::collections::HashSet;
use std::time::Duration;

/// Pacing between processed rows.
///
/// The pauses are backpressure against the renderer (overlapping
/// filesystem writes) and the dispatcher (provider rate limits), not
/// cosmetic. Tests pass zero.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub render_pause: Duration,
    pub deliver_pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            render_pause: Duration::from_millis(RENDER_PAUSE_MS),
            deliver_pause: Duration::from_millis(DELIVER_PAUSE_MS),
        }
    }
}

/// Read-only inputs for one batch
pub struct BatchContext<'a> {
    pub columns: &'a ResolvedColumns,
    pub max_marks: &'a Row,
    /// Zero-based index of the first candidate student row
    pub first_data_row: usize,
    pub mode: MailMode,
    pub ids_filter: Option<&'a HashSet<String>>,
    /// Required in mail modes; every mode-1 message goes here
    pub coordinator_email: Option<&'a str>,
}

/// Mutable state owned by the runner for the duration of one batch
struct BatchState {
    cursor: usize,
    succeeded: usize,
}

pub struct BatchRunner<T: BatchSteps> {
    steps: T,
    options: BatchOptions,
}

impl<T: BatchSteps> BatchRunner<T> {
    pub fn new(steps: T) -> Self {
        Self {
            steps,
            options: BatchOptions::default(),
        }
    }

    pub fn with_options(steps: T, options: BatchOptions) -> Self {
        Self { steps, options }
    }

    pub fn steps(&self) -> &T {
        &self.steps
    }

    /// Drive the batch to completion and emit the summary line.
    ///
    /// Rows are visited in strict ascending index order; each render or
    /// delivery is awaited before the pacing pause and the next row.
    /// Per-row failures are logged and never halt the batch.
    pub async fn run(
        &self,
        sheet: &Sheet,
        ctx: &BatchContext<'_>,
        log: &mut RunLog,
    ) -> BatchSummary {
        let mail_enabled = ctx.mode.is_enabled();
        let mut state = BatchState {
            cursor: ctx.first_data_row,
            succeeded: 0,
        };

        while state.cursor < sheet.rows.len() {
            let index = state.cursor;
            let row = &sheet.rows[index];
            state.cursor += 1;

            match classify(row, ctx.columns, ctx.ids_filter, mail_enabled) {
                Classification::Ignore => continue,

                Classification::SkipInvalid(reason) => {
                    if mail_enabled {
                        log.line(&format!("Skipping row {} ({})", index + 1, reason.describe()));
                    } else {
                        log.tick('x');
                    }
                }

                Classification::SkipFiltered => {
                    if mail_enabled {
                        log.line(&format!("Skipping row {} (not in the ids list)", index + 1));
                    } else {
                        log.tick('S');
                    }
                }

                Classification::Process => {
                    let record = build_record(row, ctx.max_marks, ctx.columns);

                    let document = match self.steps.render(&record).await {
                        Ok(document) => document,
                        Err(e) => {
                            log.line(&format!(
                                "Failed to render document for {}: {}",
                                record.number, e
                            ));
                            continue;
                        }
                    };

                    if mail_enabled {
                        let recipient = match ctx.mode {
                            MailMode::Coordinator => {
                                ctx.coordinator_email.unwrap_or_default().to_string()
                            }
                            _ => record.email.clone().unwrap_or_default(),
                        };

                        match self.steps.deliver(&document, &recipient).await {
                            Ok(()) => {
                                state.succeeded += 1;
                                log.line(&format!(
                                    "Sent email for {} to {}",
                                    record.number, recipient
                                ));
                            }
                            Err(e) => {
                                log.line(&format!(
                                    "Failed to send email for {} to {}: {}",
                                    record.number, recipient, e
                                ));
                            }
                        }
                        tokio::time::sleep(self.options.deliver_pause).await;
                    } else {
                        log.tick('.');
                        state.succeeded += 1;
                        tokio::time::sleep(self.options.render_pause).await;
                    }
                }
            }
        }

        let summary = BatchSummary {
            mode: ctx.mode,
            succeeded: state.succeeded,
        };
        log.line(&summary.line());
        summary
    }
}
