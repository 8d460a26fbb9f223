//! Service modules for business logic

pub mod classifier;
pub mod records;
pub mod sheet;

// Re-export the service entry points
pub use classifier::{classify, parse_ids_filter};
pub use records::build_record;
pub use sheet::{load_sheet, max_marks_row};
