pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod pages;
pub(crate) mod slug;

use std::path::PathBuf;

use pageloom_core::Settings;
use pageloom_db::Connection;

use crate::CliError;

/// Open the page database for reading.
///
/// Returns `Ok(None)` (after telling the user) when no database exists yet.
pub(crate) fn open_existing_db(
    settings: &Settings,
    db_path: Option<PathBuf>,
) -> Result<Option<(Connection, PathBuf)>, CliError> {
    let db_path = db_path.unwrap_or_else(|| settings.database_path());

    if !db_path.exists() {
        log::warn!("No page database found at {}", db_path.display());
        log::info!("Run 'pageloom import csv <FILE>' or 'pageloom import outline <FILE>' to create one.");
        return Ok(None);
    }

    let conn = pageloom_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open page database: {}", e)))?;
    Ok(Some((conn, db_path)))
}
