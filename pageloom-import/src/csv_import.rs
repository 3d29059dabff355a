//! Map validated CSV rows to pages and submit them.
//!
//! Columns are matched by header name, so column order doesn't matter:
//!
//! | Header | Field |
//! |--------|-------|
//! | `post_title` | title (required) |
//! | `post_parent` | title of a page defined on an earlier row |
//! | `meta_description` | excerpt |
//! | `featured_image` | featured image URL |
//! | `page_template` | template |
//! | `post_status` | status |
//! | `slug` | slug (normalized; derived from the title when empty) |
//!
//! Unrecognized headers are ignored.

use std::collections::HashMap;

use pageloom_core::{PageId, PageIntent, PageSink, sanitize_text, slugify};

use crate::csv_validate::{CsvTable, UploadDescriptor, ValidationLimits, validate_upload};
use crate::error::{ImportError, SkipReason};
use crate::progress::ImportProgress;
use crate::report::{ImportOptions, ImportReport, submit};

pub const COL_TITLE: &str = "post_title";
pub const COL_PARENT: &str = "post_parent";
pub const COL_DESCRIPTION: &str = "meta_description";
pub const COL_IMAGE: &str = "featured_image";
pub const COL_TEMPLATE: &str = "page_template";
pub const COL_STATUS: &str = "post_status";
pub const COL_SLUG: &str = "slug";

/// Validate an upload and import every valid row.
///
/// File-level problems return `Err` before anything is created. Row-level
/// problems are recorded in the returned report.
pub fn import_csv<S: PageSink + ?Sized>(
    upload: &UploadDescriptor,
    limits: &ValidationLimits,
    sink: &mut S,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError> {
    if let Some(p) = progress {
        p.on_phase(&format!("Validating {}", upload.declared_name));
    }
    let table = validate_upload(upload, limits)?;
    Ok(import_csv_table(&table, sink, options, progress))
}

/// Import rows from an already-validated table.
///
/// A row may name any page created on an earlier row as its parent. Parent
/// titles that aren't known yet (including ones defined further down the
/// file) resolve to root. When two rows share a title, the later one wins
/// for subsequent parent lookups.
pub fn import_csv_table<S: PageSink + ?Sized>(
    table: &CsvTable,
    sink: &mut S,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> ImportReport {
    let mut report = ImportReport::default();
    let mut parents: HashMap<String, PageId> = HashMap::new();
    let total = table.rows.len();

    if !table.headers.iter().any(|h| h == COL_TITLE) {
        log::warn!("CSV has no '{}' column; every row will be skipped", COL_TITLE);
    }
    if let Some(p) = progress {
        p.on_phase(&format!("Importing {} row(s)", total));
    }

    for (i, row) in table.rows.iter().enumerate() {
        let index = i + 1;

        let mut intent = match map_row(&table.headers, row, options) {
            Ok(intent) => intent,
            Err(reason) => {
                log::warn!("Skipping row {}: {}", index, reason);
                report.skip(index, reason);
                if let Some(p) = progress {
                    p.on_record(index, total, "");
                }
                continue;
            }
        };

        if let Some(parent_title) = &intent.parent_title {
            intent.parent = parents.get(parent_title).copied();
            if intent.parent.is_none() {
                log::debug!(
                    "Row {}: parent '{}' not created yet, placing '{}' at root",
                    index,
                    parent_title,
                    intent.title
                );
            }
        }

        if let Some(id) = submit(sink, &intent, index, &mut report) {
            parents.insert(intent.title.clone(), id);
        }

        if let Some(p) = progress {
            p.on_record(index, total, &intent.title);
        }
    }

    if let Some(p) = progress {
        p.on_complete(&report.summary());
    }
    report
}

/// Map one data row to a page intent (parent not yet resolved).
pub fn map_row(
    headers: &[String],
    row: &[String],
    options: &ImportOptions,
) -> Result<PageIntent, SkipReason> {
    if row.len() != headers.len() {
        return Err(SkipReason::MalformedRow {
            expected: headers.len(),
            found: row.len(),
        });
    }

    let fields: HashMap<&str, &str> = headers
        .iter()
        .map(String::as_str)
        .zip(row.iter().map(String::as_str))
        .collect();
    let get = |key: &str| fields.get(key).copied().unwrap_or("");

    let title = sanitize_text(get(COL_TITLE));
    if title.is_empty() {
        return Err(SkipReason::EmptyTitle);
    }

    let parent_title = Some(sanitize_text(get(COL_PARENT))).filter(|t| !t.is_empty());

    let slug = match slugify(get(COL_SLUG), options.slug_max_length) {
        provided if !provided.is_empty() => provided,
        _ => slugify(&title, options.slug_max_length),
    };

    let status = match sanitize_text(get(COL_STATUS)) {
        s if s.is_empty() => options.default_status.clone(),
        s => s,
    };

    let featured_image_url = Some(get(COL_IMAGE).trim().to_string()).filter(|u| !u.is_empty());

    Ok(PageIntent {
        title,
        slug,
        status,
        template: get(COL_TEMPLATE).trim().to_string(),
        excerpt: sanitize_text(get(COL_DESCRIPTION)),
        featured_image_url,
        depth: 0,
        parent_title,
        parent: None,
    })
}
