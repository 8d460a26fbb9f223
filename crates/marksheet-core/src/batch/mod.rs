//! Batch orchestration: the step seam, the live steps and the runner

pub mod runner;
pub mod traits;

use crate::clients::{MailDispatcher, PdfRenderer};
use crate::error::{MarksheetError, Result};
use async_trait::async_trait;
use marksheet_types::{RenderedDocument, StudentRecord};

pub use runner::{BatchContext, BatchOptions, BatchRunner};
pub use traits::BatchSteps;

/// Production steps: the PDF renderer plus an optional SMTP dispatcher
pub struct LiveBatchSteps {
    renderer: PdfRenderer,
    mailer: Option<MailDispatcher>,
}

impl LiveBatchSteps {
    pub fn new(renderer: PdfRenderer, mailer: Option<MailDispatcher>) -> Self {
        Self { renderer, mailer }
    }

    pub fn mailer(&self) -> Option<&MailDispatcher> {
        self.mailer.as_ref()
    }
}

#[async_trait]
impl BatchSteps for LiveBatchSteps {
    async fn render(&self, record: &StudentRecord) -> Result<RenderedDocument> {
        self.renderer.render(record)
    }

    async fn deliver(&self, document: &RenderedDocument, recipient: &str) -> Result<()> {
        match &self.mailer {
            Some(mailer) => mailer.send(recipient, document).await,
            // The runner only delivers in mail modes, which require a transport
            None => Err(MarksheetError::Validation(
                "delivery invoked without a mail transport".to_string(),
            )),
        }
    }
}
