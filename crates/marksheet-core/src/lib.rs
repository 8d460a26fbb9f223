//! Marksheet core library
//!
//! Business logic for turning a spreadsheet of per-student marks and
//! feedback into individually generated PDF documents, optionally
//! delivered by email. The flow is a strictly sequential batch:
//! classify each row, render one document per valid row, send it when
//! a mail mode is active.

pub mod batch;
pub mod clients;
pub mod columns;
pub mod config;
pub mod constants;
pub mod error;
pub mod runlog;
pub mod services;

// Re-export main types for easy access
pub use config::{MarksheetConfig, ResolvedColumns};
pub use error::{MarksheetError, Result};

// Re-export the collaborator types
pub use clients::{MailDispatcher, PdfRenderer};

// Re-export the batch machinery
pub use batch::{BatchContext, BatchOptions, BatchRunner, BatchSteps, LiveBatchSteps};

pub use runlog::RunLog;
