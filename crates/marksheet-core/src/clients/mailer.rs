//! SMTP delivery of rendered documents

use crate::config::MailConfig;
use crate::error::{MarksheetError, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use marksheet_types::RenderedDocument;

/// Owns the single outbound SMTP channel for the whole batch.
///
/// One message goes out per processed row; the transport's connection
/// pool is released when the dispatcher is dropped after the last row.
pub struct MailDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    subject: String,
    body: String,
}

impl MailDispatcher {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let credentials = Credentials::new(
            config.smtp.username.clone(),
            config.smtp.password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp.host)
            .map_err(|e| {
                MarksheetError::Config(format!(
                    "SMTP transport setup for {} failed: {}",
                    config.smtp.host, e
                ))
            })?
            .port(config.smtp.port)
            .credentials(credentials)
            .build();

        let from: Mailbox = config.coordinator_email.parse().map_err(|e| {
            MarksheetError::Config(format!(
                "invalid coordinator email '{}': {}",
                config.coordinator_email, e
            ))
        })?;

        Ok(Self {
            transport,
            from,
            subject: config.subject.clone(),
            body: config.body.join("\n"),
        })
    }

    /// Send one document to `recipient` with the PDF attached
    pub async fn send(&self, recipient: &str, document: &RenderedDocument) -> Result<()> {
        let to: Mailbox = recipient.parse().map_err(|e| {
            MarksheetError::Delivery(format!("invalid recipient '{}': {}", recipient, e))
        })?;

        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| MarksheetError::Delivery(format!("attachment content type: {}", e)))?;

        let attachment =
            Attachment::new(document.filename.clone()).body(document.bytes.clone(), pdf_type);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(self.body.clone()))
                    .singlepart(attachment),
            )
            .map_err(|e| MarksheetError::Delivery(format!("failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MarksheetError::Delivery(e.to_string()))
    }

    /// Probe the SMTP server without sending anything
    pub async fn test_connection(&self) -> bool {
        match self.transport.test_connection().await {
            Ok(ok) => ok,
            Err(e) => {
                log::warn!("SMTP connection test failed: {}", e);
                false
            }
        }
    }
}
