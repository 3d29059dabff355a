//! SQLite persistence layer for imported pages.
//!
//! Provides schema creation, write operations, query APIs, and a
//! [`PageSink`](pageloom_core::PageSink) implementation backed by SQLite
//! (via rusqlite with bundled feature).

pub mod fetch;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod sink;
pub mod types;

pub use fetch::{FetchError, FetchedImage, HttpImageFetcher, ImageFetcher};
pub use operations::{
    OperationError, insert_import_log, insert_media, insert_page, set_featured_media,
    unique_slug,
};
pub use queries::{
    children_of, find_page, find_page_by_slug, list_import_logs, list_pages, media_for_page,
    page_stats,
};
pub use rusqlite::Connection;
pub use schema::{open_database, open_memory};
pub use sink::SqlitePageSink;
pub use types::{ImportLog, MediaRow, NewMedia, PageRow, PageStats};
