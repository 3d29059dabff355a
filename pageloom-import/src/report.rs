//! Batch options, outcome tally, and the shared submit step.

use pageloom_core::settings::ImportSettings;
use pageloom_core::{DEFAULT_SLUG_MAX_LENGTH, DEFAULT_STATUS, PageId, PageIntent, PageSink};

use crate::error::SkipReason;

/// Options shared by both importers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Maximum slug length passed to `slugify`
    pub slug_max_length: usize,
    /// Status for records that don't specify one
    pub default_status: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            slug_max_length: DEFAULT_SLUG_MAX_LENGTH,
            default_status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl ImportOptions {
    pub fn from_settings(settings: &ImportSettings) -> Self {
        let default_status = if settings.default_status.trim().is_empty() {
            DEFAULT_STATUS.to_string()
        } else {
            settings.default_status.trim().to_string()
        };
        Self {
            slug_max_length: settings.slug_max_length,
            default_status,
        }
    }
}

/// A row or line that didn't (fully) make it into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based data-row number (CSV, header excluded) or line number (outline)
    pub index: usize,
    pub reason: SkipReason,
}

/// Final tally of one import batch.
///
/// `created == 0` is a valid outcome; a batch that never started is reported
/// as an `Err` by the entry point instead.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    /// Ids of created pages, in creation order
    pub created_ids: Vec<PageId>,
    /// Records that produced no page (malformed, empty title, persist failure)
    pub skipped: Vec<SkippedRecord>,
    pub images_attached: usize,
    /// Pages that were created but whose featured image failed
    pub image_failures: Vec<SkippedRecord>,
}

impl ImportReport {
    pub(crate) fn skip(&mut self, index: usize, reason: SkipReason) {
        self.skipped.push(SkippedRecord { index, reason });
    }

    /// Indices of all skipped records, in order.
    pub fn skipped_indices(&self) -> Vec<usize> {
        self.skipped.iter().map(|s| s.index).collect()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "{} page(s) created, {} skipped",
            self.created,
            self.skipped.len()
        );
        if self.images_attached > 0 || !self.image_failures.is_empty() {
            s.push_str(&format!(
                ", {} image(s) attached, {} image failure(s)",
                self.images_attached,
                self.image_failures.len()
            ));
        }
        s
    }
}

/// Persist one intent and, if it carries one, attach its featured image.
///
/// Returns the new id on success. Failures are logged and recorded in
/// `report`; they never propagate.
pub(crate) fn submit<S: PageSink + ?Sized>(
    sink: &mut S,
    intent: &PageIntent,
    index: usize,
    report: &mut ImportReport,
) -> Option<PageId> {
    let id = match sink.create_page(intent) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("Skipping #{} '{}': {}", index, intent.title, e);
            report.skip(index, SkipReason::PersistFailure(e.to_string()));
            return None;
        }
    };

    log::debug!(
        "Created page {} '{}' (slug '{}', parent {})",
        id,
        intent.title,
        intent.slug,
        intent
            .parent
            .map(|p| p.to_string())
            .unwrap_or_else(|| "root".to_string()),
    );
    report.created += 1;
    report.created_ids.push(id);

    if let Some(image) = intent.featured_image() {
        match sink.attach_featured_image(id, &image) {
            Ok(()) => report.images_attached += 1,
            Err(e) => {
                log::warn!(
                    "Failed to attach featured image {} to '{}': {}",
                    image.url,
                    intent.title,
                    e
                );
                report.image_failures.push(SkippedRecord {
                    index,
                    reason: SkipReason::ImageAttachFailure(e.to_string()),
                });
            }
        }
    }

    Some(id)
}
