//! Progress callbacks for page imports.

/// Rows or lines between two `LogProgress` lines.
///
/// Uploads are capped at 10,000 rows, so this gives at most a hundred lines.
pub const LOG_EVERY: usize = 100;

/// Receives progress while a CSV or outline is turned into pages.
///
/// `total` counts every data row or outline line, blank ones included, so
/// `current` reaches `total` even when some entries are skipped.
pub trait ImportProgress {
    /// One CSV row or outline line has been handled; `title` is its page
    /// title, or empty when the entry had none.
    fn on_record(&self, current: usize, total: usize, title: &str);

    /// A new stage began, such as validating the upload.
    fn on_phase(&self, message: &str);

    /// The batch finished; `message` is the report summary.
    fn on_complete(&self, message: &str);
}

/// Ignores every update.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_record(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Writes progress through `log`, one line every [`LOG_EVERY`] entries
/// plus the last one.
pub struct LogProgress;

impl LogProgress {
    fn should_log(current: usize, total: usize) -> bool {
        current == 1 || current == total || current.is_multiple_of(LOG_EVERY)
    }
}

impl ImportProgress for LogProgress {
    fn on_record(&self, current: usize, total: usize, title: &str) {
        if Self::should_log(current, total) {
            log::info!("  page {}/{}: {}", current, total, title);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("Import finished: {}", message);
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
