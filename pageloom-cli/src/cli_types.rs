//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pageloom")]
#[command(about = "Bulk-create page hierarchies from CSV files and outlines", long_about = None)]
pub(crate) struct Cli {
    /// Page database (defaults to the configured path, then the platform data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create pages from a CSV file or an outline
    Import {
        #[command(subcommand)]
        source: ImportSource,
    },

    /// Print the slug generated for a title
    Slug {
        /// Title to convert
        title: String,

        /// Maximum slug length (default: import.slug_max_length)
        #[arg(long)]
        max_length: Option<usize>,
    },

    /// Inspect stored pages
    Pages {
        #[command(subcommand)]
        action: PagesAction,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ImportSource {
    /// Import a CSV file with a post_title header
    Csv {
        /// CSV file to import
        file: PathBuf,

        /// Validate and show the resulting tree without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Import a dash-indented outline ("-" reads stdin)
    Outline {
        /// Outline file, or "-" for stdin
        file: PathBuf,

        /// Show the resulting tree without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum PagesAction {
    /// Show stored pages as an indented tree
    List,

    /// Show page, media, and import counts
    Stats,

    /// Show recent import batches
    History {
        /// Maximum number of batches to show
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and their sources
    Show,

    /// Print the settings file path
    Path,

    /// Set a value, e.g. `import.default_status draft`
    Set {
        /// Setting name as section.field
        key: String,

        /// New value
        value: String,
    },
}
