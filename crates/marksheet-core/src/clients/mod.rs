//! Collaborator modules: document rendering and mail delivery

pub mod mailer;
pub mod pdf;

// Re-export the collaborator types
pub use mailer::MailDispatcher;
pub use pdf::PdfRenderer;
