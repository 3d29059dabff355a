//! Dash-indented outline parser.
//!
//! Each non-blank line describes one page. Leading dashes give the nesting
//! depth; optional suffixes carry extra fields:
//!
//! ```text
//! line := ('-')* title [':+' description] [':*' image_url] ['::template=' name] ['::status=' status]
//! ```
//!
//! Suffixes are peeled off in a fixed order, each taking everything after
//! the first occurrence of its delimiter in what is left of the line:
//!
//! 1. `:+` description
//! 2. `:*` featured image URL
//! 3. `::template=` template
//! 4. `::status=` status
//!
//! Because a description swallows anything after it, a line that uses every
//! field reads right to left:
//!
//! ```text
//! --Pricing ::status=draft ::template=wide :* https://example.com/p.png :+ Plans and prices
//! ```

use pageloom_core::{PageId, PageIntent, PageSink, slugify, strip_tags};

use crate::error::SkipReason;
use crate::progress::ImportProgress;
use crate::report::{ImportOptions, ImportReport, submit};

const DESCRIPTION_DELIM: &str = ":+";
const IMAGE_DELIM: &str = ":*";
const TEMPLATE_DELIM: &str = "::template=";
const STATUS_DELIM: &str = "::status=";

/// Result of parsing one outline line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Nothing but whitespace; ignored entirely
    Blank,
    /// Markup without a title (e.g. only dashes); skipped
    Untitled { depth: usize },
    Page(PageIntent),
}

/// Split `text` at the first `delim`, returning the head and the trimmed tail.
fn split_suffix<'a>(text: &'a str, delim: &str) -> (&'a str, Option<&'a str>) {
    match text.find(delim) {
        Some(pos) => (&text[..pos], Some(text[pos + delim.len()..].trim())),
        None => (text, None),
    }
}

/// Parse a single outline line. Parent ids are left unresolved.
pub fn parse_line(line: &str, options: &ImportOptions) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }

    let (rest, description) = split_suffix(line, DESCRIPTION_DELIM);
    let (rest, image) = split_suffix(rest, IMAGE_DELIM);
    let (rest, template) = split_suffix(rest, TEMPLATE_DELIM);
    let (rest, status) = split_suffix(rest, STATUS_DELIM);

    let rest = rest.trim();
    let depth = rest.chars().take_while(|&c| c == '-').count();
    // '-' is one byte, so depth is also a byte offset
    let title = strip_tags(&rest[depth..]).trim().to_string();

    if title.chars().all(|c| c == '-' || c.is_whitespace()) {
        return ParsedLine::Untitled { depth };
    }

    let slug = slugify(&title, options.slug_max_length);
    let status = status
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| options.default_status.clone());

    ParsedLine::Page(PageIntent {
        title,
        slug,
        status,
        template: template.unwrap_or("").to_string(),
        excerpt: description.map(|d| strip_tags(d).trim().to_string()).unwrap_or_default(),
        featured_image_url: image.filter(|u| !u.is_empty()).map(str::to_string),
        depth,
        parent_title: None,
        parent: None,
    })
}

/// Most recently created page at each depth.
///
/// Slots can be empty when the outline skips a level (depth 0 followed
/// directly by depth 2); a child whose parent slot is empty goes to root.
#[derive(Debug, Default)]
struct DepthStack {
    slots: Vec<Option<PageId>>,
}

impl DepthStack {
    fn parent_for(&self, depth: usize) -> Option<PageId> {
        if depth == 0 {
            return None;
        }
        self.slots.get(depth - 1).copied().flatten()
    }

    /// Record a page at `depth`, discarding every deeper (now stale) entry.
    fn record(&mut self, depth: usize, id: PageId) {
        if self.slots.len() <= depth {
            self.slots.resize(depth + 1, None);
        }
        self.slots[depth] = Some(id);
        self.slots.truncate(depth + 1);
    }
}

/// Parse an outline and create its pages in order.
pub fn import_outline<S: PageSink + ?Sized>(
    text: &str,
    sink: &mut S,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> ImportReport {
    let mut report = ImportReport::default();
    let mut stack = DepthStack::default();
    let total = text.lines().count();

    if let Some(p) = progress {
        p.on_phase(&format!("Importing outline ({} line(s))", total));
    }

    for (i, line) in text.lines().enumerate() {
        let index = i + 1;

        let title = match parse_line(line, options) {
            ParsedLine::Blank => String::new(),
            ParsedLine::Untitled { depth } => {
                log::warn!("Skipping line {}: no title (depth {})", index, depth);
                report.skip(index, SkipReason::EmptyTitle);
                String::new()
            }
            ParsedLine::Page(mut intent) => {
                intent.parent = stack.parent_for(intent.depth);
                if let Some(id) = submit(sink, &intent, index, &mut report) {
                    stack.record(intent.depth, id);
                }
                intent.title
            }
        };

        if let Some(p) = progress {
            p.on_record(index, total, &title);
        }
    }

    if let Some(p) = progress {
        p.on_complete(&report.summary());
    }
    report
}

#[cfg(test)]
#[path = "tests/outline_tests.rs"]
mod tests;
