use serde::{Deserialize, Serialize};

/// Status given to pages that don't specify one.
pub const DEFAULT_STATUS: &str = "publish";

/// Identifier assigned to a page by the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(pub u64);

impl PageId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A normalized, validated request to create one page.
///
/// Produced by either importer and consumed by a [`PageSink`](crate::PageSink).
/// `depth` and `parent_title` are structural hints from the source format;
/// `parent` is the resolved parent id (`None` means root) and is the only
/// parent information a sink should read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIntent {
    /// Display title, never empty
    pub title: String,

    /// URL-safe identifier (`[a-z0-9-]`, no leading/trailing/double hyphens)
    pub slug: String,

    /// Publication status, e.g. `publish` or `draft`
    pub status: String,

    /// Template override; empty means the store's default
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub template: String,

    /// Short summary, from the "meta description" field
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excerpt: String,

    /// Remote image to attach as the featured image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image_url: Option<String>,

    /// Nesting depth from an outline (0 for top level and for CSV rows)
    #[serde(default)]
    pub depth: usize,

    /// Title of the parent page as written in a CSV row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,

    /// Resolved parent page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PageId>,
}

impl PageIntent {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            status: DEFAULT_STATUS.to_string(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_parent(mut self, parent: Option<PageId>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_featured_image(mut self, url: impl Into<String>) -> Self {
        self.featured_image_url = Some(url.into());
        self
    }

    /// Build the attachment request for this page's featured image, if it has one.
    ///
    /// The page title doubles as the image title and alt text; the excerpt
    /// becomes the image description.
    pub fn featured_image(&self) -> Option<FeaturedImage<'_>> {
        self.featured_image_url.as_deref().map(|url| FeaturedImage {
            url,
            title: &self.title,
            alt: &self.title,
            description: &self.excerpt,
        })
    }
}

/// A request to attach a remote image to an existing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedImage<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub alt: &'a str,
    pub description: &'a str,
}
