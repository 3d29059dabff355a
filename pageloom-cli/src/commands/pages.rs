use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pageloom_core::Settings;

use super::open_existing_db;
use crate::CliError;
use crate::display::{heading, parse_hex_color};
use crate::tree::flatten_tree;

/// Print every stored page as a dash-indented tree.
pub(crate) fn run_pages_list(settings: &Settings, db_path: Option<PathBuf>) -> Result<(), CliError> {
    let Some((conn, db_path)) = open_existing_db(settings, db_path)? else {
        return Ok(());
    };

    let pages = pageloom_db::list_pages(&conn)
        .map_err(|e| CliError::database(format!("Failed to list pages: {}", e)))?;
    let brand = settings
        .display
        .brand_color
        .as_deref()
        .and_then(parse_hex_color);

    log::info!(
        "{}",
        heading(&format!("{} page(s) in {}", pages.len(), db_path.display()), brand)
    );
    for (depth, page) in flatten_tree(&pages, |p| p.id, |p| p.parent_id) {
        let image = if page.featured_media_id.is_some() {
            " \u{1F5BC}"
        } else {
            ""
        };
        log::info!(
            "  {}{} {}{}",
            "-".repeat(depth),
            page.title,
            format!("({}, {})", page.slug, page.status).if_supports_color(Stdout, |t| t.dimmed()),
            image,
        );
    }

    Ok(())
}

pub(crate) fn run_pages_stats(settings: &Settings, db_path: Option<PathBuf>) -> Result<(), CliError> {
    let Some((conn, db_path)) = open_existing_db(settings, db_path)? else {
        return Ok(());
    };

    let stats = pageloom_db::page_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query page stats: {}", e)))?;

    log::info!(
        "{}",
        "Page Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Pages:          {:>8}", stats.pages);
    log::info!("  Root pages:     {:>8}", stats.root_pages);
    log::info!("  Media:          {:>8}", stats.media);
    log::info!("  Imports:        {:>8}", stats.imports);

    Ok(())
}

pub(crate) fn run_pages_history(
    settings: &Settings,
    db_path: Option<PathBuf>,
    limit: u32,
) -> Result<(), CliError> {
    let Some((conn, _)) = open_existing_db(settings, db_path)? else {
        return Ok(());
    };

    let logs = pageloom_db::list_import_logs(&conn, Some(limit))
        .map_err(|e| CliError::database(format!("Failed to list imports: {}", e)))?;

    if logs.is_empty() {
        log::info!("No imports recorded yet.");
        return Ok(());
    }

    log::info!("{}", "Recent Imports".if_supports_color(Stdout, |t| t.bold()));
    for entry in &logs {
        log::info!(
            "  {} {:<8} {}: {} created, {} skipped, {} image(s), {} image failure(s)",
            entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
            entry.source_kind,
            entry.source_name.if_supports_color(Stdout, |t| t.cyan()),
            entry.pages_created,
            entry.records_skipped,
            entry.images_attached,
            entry.image_failures,
        );
    }

    Ok(())
}
