//! Step trait for the batch pipeline

use crate::error::Result;
use async_trait::async_trait;
use marksheet_types::{RenderedDocument, StudentRecord};

/// The two side-effecting steps the runner drives rows through.
///
/// Each step has explicit, required parameters; tests substitute mocks
/// to exercise the runner without touching the filesystem or an SMTP
/// server.
#[async_trait]
pub trait BatchSteps: Send + Sync {
    /// Render the document artifact for one student
    async fn render(&self, record: &StudentRecord) -> Result<RenderedDocument>;

    /// Deliver a rendered document to `recipient`
    async fn deliver(&self, document: &RenderedDocument, recipient: &str) -> Result<()>;
}
