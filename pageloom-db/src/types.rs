//! Row types returned by queries.

use pageloom_core::PageId;

/// A stored page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub template: String,
    pub excerpt: String,
    pub parent_id: Option<PageId>,
    pub featured_media_id: Option<i64>,
    pub created_at: String,
}

/// Metadata of a stored image. The blob itself is not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRow {
    pub id: i64,
    pub page_id: PageId,
    pub source_url: String,
    pub title: String,
    pub alt: String,
    pub description: String,
    pub mime_type: String,
    pub byte_size: i64,
}

/// An image to insert.
#[derive(Debug, Clone)]
pub struct NewMedia<'a> {
    pub page_id: PageId,
    pub source_url: &'a str,
    pub title: &'a str,
    pub alt: &'a str,
    pub description: &'a str,
    pub mime_type: &'a str,
    pub data: &'a [u8],
}

/// Record of one import batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLog {
    pub id: i64,
    /// "csv" or "outline"
    pub source_kind: String,
    pub source_name: String,
    pub imported_at: String,
    pub pages_created: i64,
    pub records_skipped: i64,
    pub images_attached: i64,
    pub image_failures: i64,
}

impl ImportLog {
    /// Start a log entry stamped with the current time. Counts start at zero.
    pub fn new(source_kind: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            source_kind: source_kind.into(),
            source_name: source_name.into(),
            imported_at: chrono::Utc::now().to_rfc3339(),
            pages_created: 0,
            records_skipped: 0,
            images_attached: 0,
            image_failures: 0,
        }
    }
}

/// Summary statistics for the page database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStats {
    pub pages: i64,
    pub root_pages: i64,
    pub media: i64,
    pub imports: i64,
}
