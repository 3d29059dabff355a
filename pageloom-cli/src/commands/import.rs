use std::io::Read;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pageloom_core::{MemorySink, PageSink, Settings};
use pageloom_db::{HttpImageFetcher, ImportLog, SqlitePageSink, insert_import_log, open_database};
use pageloom_import::{
    ImportOptions, ImportProgress, ImportReport, UploadDescriptor, ValidationLimits, import_csv,
    import_outline,
};

use crate::CliError;
use crate::display::heading;
use crate::tree::flatten_tree;

/// Import a CSV file.
pub(crate) fn run_import_csv(
    settings: &Settings,
    db_path: Option<PathBuf>,
    file: &Path,
    dry_run: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let upload = UploadDescriptor::from_path(file).map_err(|e| {
        CliError::other(format!("Cannot read {}: {}", file.display(), e))
    })?;
    let limits = ValidationLimits::from_settings(&settings.import);
    let options = ImportOptions::from_settings(&settings.import);
    let progress = CliImportProgress::new(quiet);

    let source_name = upload.declared_name.clone();
    run_batch(settings, db_path, dry_run, "csv", &source_name, |sink| {
        Ok(import_csv(&upload, &limits, sink, &options, Some(&progress))?)
    })
}

/// Import an outline from a file, or from stdin when `file` is `-`.
pub(crate) fn run_import_outline(
    settings: &Settings,
    db_path: Option<PathBuf>,
    file: &Path,
    dry_run: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let (text, source_name) = if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        (text, "stdin".to_string())
    } else {
        let text = std::fs::read_to_string(file).map_err(|e| {
            CliError::other(format!("Cannot read {}: {}", file.display(), e))
        })?;
        (text, file.display().to_string())
    };

    let options = ImportOptions::from_settings(&settings.import);
    let progress = CliImportProgress::new(quiet);

    run_batch(settings, db_path, dry_run, "outline", &source_name, |sink| {
        Ok(import_outline(&text, sink, &options, Some(&progress)))
    })
}

/// Run one import against either a throwaway in-memory sink (dry run) or
/// the page database, then report the outcome.
fn run_batch(
    settings: &Settings,
    db_path: Option<PathBuf>,
    dry_run: bool,
    source_kind: &str,
    source_name: &str,
    import: impl FnOnce(&mut dyn PageSink) -> Result<ImportReport, CliError>,
) -> Result<(), CliError> {
    let brand = settings
        .display
        .brand_color
        .as_deref()
        .and_then(crate::display::parse_hex_color);

    if dry_run {
        let mut sink = MemorySink::new();
        let report = import(&mut sink)?;

        log::info!(
            "{}",
            heading(&format!("Dry run: {} ({})", source_name, source_kind), brand)
        );
        let pages = flatten_tree(sink.pages(), |p| p.id, |p| p.intent.parent);
        for (depth, page) in pages {
            log::info!(
                "  {}{} {}",
                "-".repeat(depth),
                page.intent.title,
                format!("({}, {})", page.intent.slug, page.intent.status)
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        crate::log_blank();
        print_report(&report);
        log::info!("Nothing was written.");
        return Ok(());
    }

    let db_path = db_path.unwrap_or_else(|| settings.database_path());
    let conn = open_database(&db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open page database at {}: {}",
            db_path.display(),
            e
        ))
    })?;
    let fetcher = HttpImageFetcher::new()
        .map_err(|e| CliError::other(format!("Failed to create HTTP client: {}", e)))?;
    let mut sink = SqlitePageSink::new(&conn, Box::new(fetcher))
        .with_slug_max_length(settings.import.slug_max_length);

    log::info!(
        "{}",
        heading(
            &format!("Importing {} into {}", source_name, db_path.display()),
            brand
        )
    );
    let report = import(&mut sink)?;

    let mut entry = ImportLog::new(source_kind, source_name);
    entry.pages_created = report.created as i64;
    entry.records_skipped = report.skipped.len() as i64;
    entry.images_attached = report.images_attached as i64;
    entry.image_failures = report.image_failures.len() as i64;
    if let Err(e) = insert_import_log(&conn, &entry) {
        log::warn!("Failed to log import: {}", e);
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ImportReport) {
    for skipped in &report.skipped {
        log::warn!(
            "  {} #{}: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            skipped.index,
            skipped.reason,
        );
    }
    for failure in &report.image_failures {
        log::warn!(
            "  {} #{}: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            failure.index,
            failure.reason,
        );
    }

    let mark = if report.skipped.is_empty() && report.image_failures.is_empty() {
        "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()).to_string()
    };
    log::info!("  {} {}", mark, report.summary());
}

/// CLI progress reporter: a spinner while records are processed.
struct CliImportProgress {
    pb: ProgressBar,
}

impl CliImportProgress {
    fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} [{pos}/{len}] {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            pb
        };
        Self { pb }
    }
}

impl ImportProgress for CliImportProgress {
    fn on_record(&self, current: usize, total: usize, title: &str) {
        self.pb.set_length(total as u64);
        self.pb.set_position(current as u64);
        self.pb.set_message(title.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| log::debug!("{}", message));
    }

    fn on_complete(&self, _message: &str) {
        self.pb.finish_and_clear();
    }
}
