//! Upload validation and CSV parsing.
//!
//! [`validate_upload`] runs every file-level check in a fixed order and stops
//! at the first failure:
//!
//! ```text
//! 1. transport status     → UploadTransport
//! 2. declared size        → FileTooLarge
//! 3. on-disk size         → UnreadableFile / FileTooLarge
//! 4. zero bytes           → EmptyFile
//! 5. sniffed MIME type    → InvalidMimeType
//! 6. ".csv" extension     → InvalidExtension
//! 7. full re-read + size  → UnreadableFile / FileTooLarge / EmptyFile
//! 8. parse + row count    → TooManyRows
//! ```
//!
//! Size is checked three times on purpose: the declared size comes from the
//! client and the file can change between the metadata read and the full read.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use pageloom_core::settings::ImportSettings;

use crate::error::{ImportError, UploadStatus};

/// Number of leading bytes inspected by [`sniff_mime`].
const SNIFF_LEN: usize = 8192;

const UTF8_BOM: char = '\u{feff}';

/// MIME types accepted for a CSV upload.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "text/csv",
    "text/plain",
    "application/csv",
    "text/comma-separated-values",
    "text/x-csv",
    "application/vnd.ms-excel",
];

/// Metadata describing an uploaded file, as reported by the transport.
#[derive(Debug, Clone)]
pub struct UploadDescriptor {
    /// Where the transport stored the file
    pub temp_path: PathBuf,
    /// Client-supplied filename
    pub declared_name: String,
    /// Client-supplied size in bytes
    pub declared_size: u64,
    /// Numeric transport status; 0 means success
    pub transport_error_code: u32,
}

impl UploadDescriptor {
    /// Describe a file already on disk, as if it had been uploaded successfully.
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let temp_path = path.into();
        let declared_size = fs::metadata(&temp_path)?.len();
        let declared_name = temp_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        Ok(Self {
            temp_path,
            declared_name,
            declared_size,
            transport_error_code: 0,
        })
    }
}

/// Upload size and row limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub max_file_size: u64,
    pub max_rows: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024,
            max_rows: 10_000,
        }
    }
}

impl ValidationLimits {
    pub fn from_settings(settings: &ImportSettings) -> Self {
        Self {
            max_file_size: settings.max_file_size,
            max_rows: settings.max_rows,
        }
    }
}

/// Parsed CSV content: a trimmed header row plus raw data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Run all file-level checks and parse the upload.
pub fn validate_upload(
    upload: &UploadDescriptor,
    limits: &ValidationLimits,
) -> Result<CsvTable, ImportError> {
    let status = UploadStatus::from_code(upload.transport_error_code);
    if !status.is_ok() {
        return Err(ImportError::UploadTransport(status));
    }

    check_size(upload.declared_size, limits)?;

    let path = &upload.temp_path;
    let on_disk = fs::metadata(path)
        .map_err(|e| ImportError::unreadable(path, e))?
        .len();
    check_size(on_disk, limits)?;
    if on_disk == 0 {
        return Err(ImportError::EmptyFile);
    }

    let head = read_head(path).map_err(|e| ImportError::unreadable(path, e))?;
    let mime = sniff_mime(&head);
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(ImportError::InvalidMimeType(mime.to_string()));
    }

    if !has_csv_extension(&upload.declared_name) {
        return Err(ImportError::InvalidExtension(upload.declared_name.clone()));
    }

    let content = fs::read(path).map_err(|e| ImportError::unreadable(path, e))?;
    check_size(content.len() as u64, limits)?;
    if content.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    let table = parse_csv(&content, limits.max_rows)?;
    log::debug!(
        "Validated {}: {} column(s), {} data row(s)",
        upload.declared_name,
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

fn check_size(size: u64, limits: &ValidationLimits) -> Result<(), ImportError> {
    if size > limits.max_file_size {
        return Err(ImportError::FileTooLarge {
            size,
            limit: limits.max_file_size,
        });
    }
    Ok(())
}

fn read_head(path: &std::path::Path) -> std::io::Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    Ok(head)
}

fn has_csv_extension(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".csv"))
}

/// Guess a MIME type from the leading bytes of a file.
///
/// Recognizes common binary formats by magic number, HTML by its opening
/// tag, and otherwise treats control bytes as binary. Text whose first line
/// contains a comma is `text/csv`; other text is `text/plain`.
pub fn sniff_mime(head: &[u8]) -> &'static str {
    const MAGIC: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1F\x8B", "application/gzip"),
        (b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1", "application/x-ole-storage"),
        (b"\x7FELF", "application/x-executable"),
    ];

    if head.is_empty() {
        return "application/x-empty";
    }

    for &(magic, mime) in MAGIC {
        if head.starts_with(magic) {
            return mime;
        }
    }

    let text = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);

    // Control characters other than tab, newline, vertical tab, form feed,
    // carriage return and escape mark binary content
    if text
        .iter()
        .any(|&b| matches!(b, 0x00..=0x08 | 0x0E..=0x1A | 0x1C..=0x1F))
    {
        return "application/octet-stream";
    }

    let start: Vec<u8> = text
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(14)
        .map(|b| b.to_ascii_lowercase())
        .collect();
    if start.starts_with(b"<!doctype html") || start.starts_with(b"<html") {
        return "text/html";
    }

    let first_line = text.split(|&b| b == b'\n').next().unwrap_or(&[]);
    if first_line.contains(&b',') {
        "text/csv"
    } else {
        "text/plain"
    }
}

/// Parse comma-delimited content into a [`CsvTable`].
///
/// The first record is the header. Records may have any number of fields
/// (rows are checked against the header later, one at a time). Invalid
/// UTF-8 is replaced rather than rejected. Fails with `EmptyFile` when there
/// is no header and `TooManyRows` when there are more than `max_rows` data rows.
pub fn parse_csv(content: &[u8], max_rows: usize) -> Result<CsvTable, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.byte_records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record?
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let field = String::from_utf8_lossy(field);
                let field: &str = if i == 0 {
                    field.trim_start_matches(UTF8_BOM)
                } else {
                    &field
                };
                field.trim().to_string()
            })
            .collect(),
        None => return Err(ImportError::EmptyFile),
    };

    let mut rows = Vec::new();
    let mut total = 0usize;
    for record in records {
        let record = record?;
        total += 1;
        if total <= max_rows {
            rows.push(
                record
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).into_owned())
                    .collect(),
            );
        }
    }

    if total > max_rows {
        return Err(ImportError::TooManyRows {
            rows: total,
            limit: max_rows,
        });
    }

    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
#[path = "tests/csv_validate_tests.rs"]
mod tests;
