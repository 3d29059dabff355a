//! Shared types for building page hierarchies from bulk sources.
//!
//! Both importers (CSV and outline) normalize their input into [`PageIntent`]
//! records and hand them to a [`PageSink`], which owns persistence. Nothing
//! in this crate touches a database or the network.

pub mod error;
pub mod page;
pub mod settings;
pub mod sink;
pub mod slug;
pub mod text;

pub use error::SinkError;
pub use page::{DEFAULT_STATUS, FeaturedImage, PageId, PageIntent};
pub use settings::{Settings, SettingsError};
pub use sink::{CreatedPage, MemorySink, PageSink};
pub use slug::{DEFAULT_SLUG_MAX_LENGTH, is_valid_slug, slugify, slugify_default};
pub use text::{sanitize_text, strip_tags};
