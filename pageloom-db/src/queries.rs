//! Read-only query APIs for stored pages.

use pageloom_core::PageId;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::operations::{OperationError, from_sql_id, to_sql_id};
use crate::types::{ImportLog, MediaRow, PageRow, PageStats};

const PAGE_COLUMNS: &str =
    "id, title, slug, status, template, excerpt, parent_id, featured_media_id, created_at";

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<PageRow> {
    Ok(PageRow {
        id: from_sql_id(row.get(0)?),
        title: row.get(1)?,
        slug: row.get(2)?,
        status: row.get(3)?,
        template: row.get(4)?,
        excerpt: row.get(5)?,
        parent_id: row.get::<_, Option<i64>>(6)?.map(from_sql_id),
        featured_media_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

// ── Page Queries ────────────────────────────────────────────────────────────

/// Find a page by ID.
pub fn find_page(conn: &Connection, id: PageId) -> Result<Option<PageRow>, OperationError> {
    conn.query_row(
        &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?1"),
        params![to_sql_id(id)],
        page_from_row,
    )
    .optional()
    .map_err(Into::into)
}

/// Find a page by its (unique) slug.
pub fn find_page_by_slug(conn: &Connection, slug: &str) -> Result<Option<PageRow>, OperationError> {
    conn.query_row(
        &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ?1"),
        params![slug],
        page_from_row,
    )
    .optional()
    .map_err(Into::into)
}

/// List all pages in creation order.
pub fn list_pages(conn: &Connection) -> Result<Vec<PageRow>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT {PAGE_COLUMNS} FROM pages ORDER BY id"))?;
    let rows = stmt.query_map([], page_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Direct children of `parent`, or root pages when `parent` is `None`.
pub fn children_of(
    conn: &Connection,
    parent: Option<PageId>,
) -> Result<Vec<PageRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PAGE_COLUMNS} FROM pages WHERE parent_id IS ?1 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![parent.map(to_sql_id)], page_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Media Queries ───────────────────────────────────────────────────────────

/// All images stored for a page, oldest first.
pub fn media_for_page(conn: &Connection, page_id: PageId) -> Result<Vec<MediaRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, page_id, source_url, title, alt, description, mime_type, byte_size
         FROM media WHERE page_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![to_sql_id(page_id)], |row| {
        Ok(MediaRow {
            id: row.get(0)?,
            page_id: from_sql_id(row.get(1)?),
            source_url: row.get(2)?,
            title: row.get(3)?,
            alt: row.get(4)?,
            description: row.get(5)?,
            mime_type: row.get(6)?,
            byte_size: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import batches, newest first.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_kind, source_name, imported_at, pages_created,
                records_skipped, images_attached, image_failures
         FROM import_log ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_kind: row.get(1)?,
            source_name: row.get(2)?,
            imported_at: row.get(3)?,
            pages_created: row.get(4)?,
            records_skipped: row.get(5)?,
            images_attached: row.get(6)?,
            image_failures: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Stats ───────────────────────────────────────────────────────────────────

pub fn page_stats(conn: &Connection) -> Result<PageStats, OperationError> {
    let pages: i64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |r| r.get(0))?;
    let root_pages: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pages WHERE parent_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    let media: i64 = conn.query_row("SELECT COUNT(*) FROM media", [], |r| r.get(0))?;
    let imports: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;

    Ok(PageStats {
        pages,
        root_pages,
        media,
        imports,
    })
}
