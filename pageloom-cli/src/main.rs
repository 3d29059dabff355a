//! pageloom CLI
//!
//! Command-line interface for bulk-creating page hierarchies from CSV files
//! and dash-indented outlines.

mod cli_types;
mod commands;
mod display;
mod error;
mod logging;
mod tree;

use clap::Parser;

use pageloom_core::Settings;

use cli_types::{Cli, Commands, ConfigAction, ImportSource, PagesAction};
pub(crate) use error::CliError;

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    let settings = Settings::load().unwrap_or_else(|e| {
        log::warn!("Failed to load settings: {}; using defaults", e);
        Settings::default()
    });

    let result = match cli.command {
        Commands::Import { source } => match source {
            ImportSource::Csv { file, dry_run } => {
                commands::import::run_import_csv(&settings, cli.db, &file, dry_run, cli.quiet)
            }
            ImportSource::Outline { file, dry_run } => {
                commands::import::run_import_outline(&settings, cli.db, &file, dry_run, cli.quiet)
            }
        },
        Commands::Slug { title, max_length } => {
            commands::slug::run_slug(&settings, &title, max_length);
            Ok(())
        }
        Commands::Pages { action } => match action {
            PagesAction::List => commands::pages::run_pages_list(&settings, cli.db),
            PagesAction::Stats => commands::pages::run_pages_stats(&settings, cli.db),
            PagesAction::History { limit } => {
                commands::pages::run_pages_history(&settings, cli.db, limit)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&settings);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Set { key, value } => commands::config::run_config_set(&key, &value),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
