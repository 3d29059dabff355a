//! [`PageSink`] backed by the SQLite page database.

use pageloom_core::{DEFAULT_SLUG_MAX_LENGTH, FeaturedImage, PageId, PageIntent, PageSink, SinkError};
use rusqlite::Connection;

use crate::fetch::ImageFetcher;
use crate::operations::{insert_media, insert_page, page_exists, set_featured_media};
use crate::types::NewMedia;

/// Writes pages into the `pages` table and downloaded images into `media`.
///
/// Each page is its own statement; a batch is not wrapped in a transaction,
/// so pages created before a failure stay.
pub struct SqlitePageSink<'a> {
    conn: &'a Connection,
    fetcher: Box<dyn ImageFetcher + 'a>,
    slug_max_length: usize,
}

impl<'a> SqlitePageSink<'a> {
    pub fn new(conn: &'a Connection, fetcher: Box<dyn ImageFetcher + 'a>) -> Self {
        Self {
            conn,
            fetcher,
            slug_max_length: DEFAULT_SLUG_MAX_LENGTH,
        }
    }

    /// Length limit applied when de-duplicating slugs.
    pub fn with_slug_max_length(mut self, max_length: usize) -> Self {
        self.slug_max_length = max_length;
        self
    }
}

impl PageSink for SqlitePageSink<'_> {
    fn create_page(&mut self, intent: &PageIntent) -> Result<PageId, SinkError> {
        insert_page(self.conn, intent, self.slug_max_length)
            .map_err(|e| SinkError::persist(e.to_string()))
    }

    fn attach_featured_image(
        &mut self,
        page_id: PageId,
        image: &FeaturedImage<'_>,
    ) -> Result<(), SinkError> {
        let exists =
            page_exists(self.conn, page_id).map_err(|e| SinkError::persist(e.to_string()))?;
        if !exists {
            return Err(SinkError::PageNotFound(page_id.get()));
        }

        let fetched = self
            .fetcher
            .fetch(image.url)
            .map_err(|e| SinkError::fetch(format!("{}: {}", image.url, e)))?;

        let media_id = insert_media(
            self.conn,
            &NewMedia {
                page_id,
                source_url: image.url,
                title: image.title,
                alt: image.alt,
                description: image.description,
                mime_type: &fetched.mime_type,
                data: &fetched.bytes,
            },
        )
        .map_err(|e| SinkError::persist(e.to_string()))?;

        set_featured_media(self.conn, page_id, media_id)
            .map_err(|e| SinkError::persist(e.to_string()))?;
        log::debug!("Attached media {} to page {}", media_id, page_id);
        Ok(())
    }
}
