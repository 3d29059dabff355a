//! The content-store capability the importers write through.

use crate::error::SinkError;
use crate::page::{FeaturedImage, PageId, PageIntent};

/// Trait for persisting pages and attaching featured images.
///
/// Importers call this strictly in source order: a page's parent is always
/// created (and its id returned) before any child that references it.
pub trait PageSink {
    /// Create a page record and return its new id.
    ///
    /// # Returns
    /// * `Ok(PageId)` - The page was stored
    /// * `Err(SinkError)` - The store rejected the page; the importer skips it
    fn create_page(&mut self, intent: &PageIntent) -> Result<PageId, SinkError>;

    /// Fetch `image.url` and attach it as the featured image of `page_id`.
    ///
    /// Failures are non-fatal to the batch. The default implementation
    /// reports that the sink doesn't support images.
    fn attach_featured_image(
        &mut self,
        page_id: PageId,
        image: &FeaturedImage<'_>,
    ) -> Result<(), SinkError> {
        let _ = (page_id, image);
        Err(SinkError::other("featured images are not supported by this sink"))
    }
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn create_page(&mut self, intent: &PageIntent) -> Result<PageId, SinkError> {
        (**self).create_page(intent)
    }

    fn attach_featured_image(
        &mut self,
        page_id: PageId,
        image: &FeaturedImage<'_>,
    ) -> Result<(), SinkError> {
        (**self).attach_featured_image(page_id, image)
    }
}

/// A page recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPage {
    pub id: PageId,
    pub intent: PageIntent,
    /// URL of the featured image attached after creation
    pub featured_image: Option<String>,
}

/// In-memory sink that hands out sequential ids starting at 1.
///
/// Used for dry runs (nothing is persisted) and in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: Vec<CreatedPage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All pages created so far, in creation order.
    pub fn pages(&self) -> &[CreatedPage] {
        &self.pages
    }

    pub fn get(&self, id: PageId) -> Option<&CreatedPage> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Most recently created page with exactly this title.
    pub fn find_by_title(&self, title: &str) -> Option<&CreatedPage> {
        self.pages.iter().rev().find(|p| p.intent.title == title)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageSink for MemorySink {
    fn create_page(&mut self, intent: &PageIntent) -> Result<PageId, SinkError> {
        let id = PageId(self.pages.len() as u64 + 1);
        self.pages.push(CreatedPage {
            id,
            intent: intent.clone(),
            featured_image: None,
        });
        Ok(id)
    }

    fn attach_featured_image(
        &mut self,
        page_id: PageId,
        image: &FeaturedImage<'_>,
    ) -> Result<(), SinkError> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or(SinkError::PageNotFound(page_id.0))?;
        page.featured_image = Some(image.url.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/sink_tests.rs"]
mod tests;
