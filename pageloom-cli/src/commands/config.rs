use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pageloom_core::Settings;
use pageloom_core::settings::{API_KEY_ENV, mask_value, set_value, settings_path};

use crate::CliError;

/// Show effective settings and where secrets come from.
pub(crate) fn run_config_show(settings: &Settings) {
    let path = settings_path();

    log::info!(
        "{}",
        "pageloom Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let db_source = if settings.database.path.is_some() {
        "config file"
    } else {
        "default"
    };
    let env_key = std::env::var(API_KEY_ENV).ok().filter(|v| !v.is_empty());
    let api_source = if env_key.is_some() {
        format!("env var {}", API_KEY_ENV)
    } else if settings.api.key.as_deref().is_some_and(|k| !k.is_empty()) {
        "config file".to_string()
    } else {
        "missing".to_string()
    };

    let fields: Vec<(&str, Option<String>, String)> = vec![
        (
            "import.default_status",
            Some(settings.import.default_status.clone()),
            String::new(),
        ),
        (
            "import.slug_max_length",
            Some(settings.import.slug_max_length.to_string()),
            String::new(),
        ),
        (
            "import.max_file_size",
            Some(settings.import.max_file_size.to_string()),
            String::new(),
        ),
        (
            "import.max_rows",
            Some(settings.import.max_rows.to_string()),
            String::new(),
        ),
        (
            "database.path",
            Some(settings.database_path().display().to_string()),
            format!("({})", db_source),
        ),
        (
            "api.key",
            settings.api_key().map(|k| mask_value(&k)),
            format!("({})", api_source),
        ),
        (
            "display.brand_color",
            settings.display.brand_color.clone(),
            String::new(),
        ),
    ];

    for (name, value, source) in &fields {
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Set one value in the settings file.
pub(crate) fn run_config_set(key: &str, value: &str) -> Result<(), CliError> {
    let path = settings_path();
    set_value(&path, key, value).map_err(|e| CliError::config(e.to_string()))?;

    let shown = if key == "api.key" {
        mask_value(value)
    } else {
        value.to_string()
    };
    log::info!(
        "  {} {} = {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key.if_supports_color(Stdout, |t| t.cyan()),
        shown,
        path.display(),
    );
    Ok(())
}
