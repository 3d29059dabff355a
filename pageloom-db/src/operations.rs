//! Write operations for pages, media, and the import log.

use pageloom_core::{PageId, PageIntent};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::types::{ImportLog, NewMedia};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

/// Slug used when a page's slug is empty.
const FALLBACK_SLUG: &str = "page";

pub(crate) fn to_sql_id(id: PageId) -> i64 {
    id.get() as i64
}

pub(crate) fn from_sql_id(id: i64) -> PageId {
    PageId(id as u64)
}

// ── Page Operations ─────────────────────────────────────────────────────────

/// Find a slug based on `base` that no stored page uses yet.
///
/// Collisions get `-2`, `-3`, ... appended. The base is shortened so the
/// result still fits in `max_length`.
pub fn unique_slug(
    conn: &Connection,
    base: &str,
    max_length: usize,
) -> Result<String, OperationError> {
    let base = if base.is_empty() { FALLBACK_SLUG } else { base };
    if !slug_exists(conn, base)? {
        return Ok(base.to_string());
    }

    let mut n: u64 = 2;
    loop {
        let suffix = format!("-{n}");
        // Slugs are ASCII, so byte offsets are char boundaries
        let keep = max_length.saturating_sub(suffix.len()).max(1).min(base.len());
        let candidate = format!("{}{}", base[..keep].trim_end_matches('-'), suffix);
        if !slug_exists(conn, &candidate)? {
            return Ok(candidate);
        }
        n += 1;
    }
}

fn slug_exists(conn: &Connection, slug: &str) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM pages WHERE slug = ?1)",
        params![slug],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Insert a page. Returns the new ID.
///
/// The stored slug may differ from `intent.slug` when it is already taken.
/// A parent that doesn't exist is rejected by the foreign key.
pub fn insert_page(
    conn: &Connection,
    intent: &PageIntent,
    max_slug_length: usize,
) -> Result<PageId, OperationError> {
    let slug = unique_slug(conn, &intent.slug, max_slug_length)?;
    if slug != intent.slug {
        log::debug!("Slug '{}' taken, using '{}'", intent.slug, slug);
    }

    conn.execute(
        "INSERT INTO pages (title, slug, status, template, excerpt, parent_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            intent.title,
            slug,
            intent.status,
            intent.template,
            intent.excerpt,
            intent.parent.map(to_sql_id),
        ],
    )?;
    Ok(from_sql_id(conn.last_insert_rowid()))
}

/// Point a page at its featured image.
pub fn set_featured_media(
    conn: &Connection,
    page_id: PageId,
    media_id: i64,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE pages SET featured_media_id = ?2 WHERE id = ?1",
        params![to_sql_id(page_id), media_id],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "page".to_string(),
            id: page_id.to_string(),
        });
    }
    Ok(())
}

/// Check that a page exists.
pub(crate) fn page_exists(conn: &Connection, page_id: PageId) -> Result<bool, OperationError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM pages WHERE id = ?1",
            params![to_sql_id(page_id)],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

// ── Media Operations ────────────────────────────────────────────────────────

/// Insert a downloaded image. Returns the new media ID.
pub fn insert_media(conn: &Connection, media: &NewMedia<'_>) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO media (page_id, source_url, title, alt, description, mime_type, byte_size, data)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            to_sql_id(media.page_id),
            media.source_url,
            media.title,
            media.alt,
            media.description,
            media.mime_type,
            media.data.len() as i64,
            media.data,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Record an import batch. Returns the new log ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_kind, source_name, imported_at, pages_created,
             records_skipped, images_attached, image_failures)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.source_kind,
            log.source_name,
            log.imported_at,
            log.pages_created,
            log.records_skipped,
            log.images_attached,
            log.image_failures,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
