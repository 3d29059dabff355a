//! Application settings (`~/.config/pageloom/settings.toml`).
//!
//! Every field is optional; a missing file or section falls back to the
//! defaults below. The library never reads settings on its own: callers load
//! them and pass the relevant pieces down explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::DEFAULT_STATUS;
use crate::slug::DEFAULT_SLUG_MAX_LENGTH;

/// Environment variable that overrides `api.key`.
pub const API_KEY_ENV: &str = "PAGELOOM_API_KEY";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),
    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub import: ImportSettings,
    pub database: DatabaseSettings,
    pub api: ApiSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Status for pages whose source doesn't name one
    pub default_status: String,
    pub slug_max_length: usize,
    /// Upload size limit in bytes
    pub max_file_size: u64,
    /// Maximum number of CSV data rows
    pub max_rows: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            default_status: DEFAULT_STATUS.to_string(),
            slug_max_length: DEFAULT_SLUG_MAX_LENGTH,
            max_file_size: 5 * 1024 * 1024,
            max_rows: 10_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Text,
    Integer,
}

/// Keys accepted by [`set_value`], as `section.field`.
const KNOWN_KEYS: &[(&str, ValueKind)] = &[
    ("import.default_status", ValueKind::Text),
    ("import.slug_max_length", ValueKind::Integer),
    ("import.max_file_size", ValueKind::Integer),
    ("import.max_rows", ValueKind::Integer),
    ("database.path", ValueKind::Text),
    ("api.key", ValueKind::Text),
    ("display.brand_color", ValueKind::Text),
];

/// Canonical path to the settings file: `~/.config/pageloom/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("pageloom").join("settings.toml")
}

/// Default database location: `~/.local/share/pageloom/pages.db` (platform data dir).
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("pageloom").join("pages.db")
}

impl Settings {
    /// Load settings from [`settings_path`].
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Database path: configured value, or [`default_database_path`].
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(default_database_path)
    }

    /// API key, preferring the `PAGELOOM_API_KEY` environment variable.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with(|var| std::env::var(var).ok())
    }

    /// API key resolution with an injectable environment lookup.
    pub fn api_key_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        env(API_KEY_ENV)
            .filter(|v| !v.is_empty())
            .or_else(|| self.api.key.clone().filter(|v| !v.is_empty()))
    }

    /// Pretty TOML rendering of the effective settings.
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Set one `section.field` value in the settings file at `path`.
///
/// Uses `toml::Value` for a surgical update so unrelated fields and sections
/// are preserved. The resulting document must still parse as [`Settings`].
pub fn set_value(path: &Path, key: &str, value: &str) -> Result<(), SettingsError> {
    let kind = KNOWN_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
    let (section, field) = key
        .split_once('.')
        .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;

    let new_value = match kind {
        ValueKind::Text => toml::Value::String(value.to_string()),
        ValueKind::Integer => value
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .map(toml::Value::Integer)
            .ok_or_else(|| SettingsError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            })?,
    };

    let mut doc: toml::Value = match std::fs::read_to_string(path) {
        Ok(contents) => contents.parse()?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            toml::Value::Table(Default::default())
        }
        Err(e) => return Err(e.into()),
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| std::io::Error::other("settings.toml root is not a table"))?;
    let section_value = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section_table = section_value
        .as_table_mut()
        .ok_or_else(|| std::io::Error::other(format!("[{section}] is not a table")))?;
    section_table.insert(field.to_string(), new_value);

    // Reject documents that would no longer load
    let serialized = toml::to_string_pretty(&doc)?;
    let _: Settings = toml::from_str(&serialized)?;

    // Write atomically
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}

/// Mask a secret for display, keeping the first two characters.
pub fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let prefix: String = s.chars().take(2).collect();
        format!("{prefix}****")
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
