//! Bulk page import from CSV uploads and dash-indented outlines.
//!
//! This crate owns validation and parsing. Both importers produce
//! [`PageIntent`](pageloom_core::PageIntent) records in source order, resolve
//! parents against pages created earlier in the same batch, and submit them to
//! a [`PageSink`](pageloom_core::PageSink):
//!
//! - CSV rows name their parent by title (`post_parent`), resolved through a
//!   title → id map.
//! - Outline lines encode nesting with leading dashes, resolved through a
//!   stack indexed by depth.

pub mod csv_import;
pub mod csv_validate;
pub mod error;
pub mod outline;
pub mod progress;
pub mod report;

pub use csv_import::{import_csv, import_csv_table, map_row};
pub use csv_validate::{
    ALLOWED_MIME_TYPES, CsvTable, UploadDescriptor, ValidationLimits, parse_csv, sniff_mime,
    validate_upload,
};
pub use error::{ImportError, SkipReason, UploadStatus};
pub use outline::{ParsedLine, import_outline, parse_line};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use report::{ImportOptions, ImportReport, SkippedRecord};
