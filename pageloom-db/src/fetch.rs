//! Downloading featured images.

use std::io::Read;
use std::time::Duration;

use thiserror::Error;

/// Default cap on a downloaded image (10 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid image URL '{0}'")]
    InvalidUrl(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Not an image (content type '{content_type}')")]
    NotAnImage { content_type: String },

    #[error("Image is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("Failed to read image body: {0}")]
    Body(#[from] std::io::Error),
}

/// A downloaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Trait for retrieving a remote image by URL.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

/// Fetches images over HTTP(S) with a blocking `reqwest` client.
///
/// Image URLs come from uploaded files, so requests carry no credentials.
pub struct HttpImageFetcher {
    http: reqwest::blocking::Client,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pageloom/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let parsed = parse_image_url(url)?;

        let response = self.http.get(parsed).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let mime_type = image_mime_type(&content_type)
            .ok_or_else(|| FetchError::NotAnImage {
                content_type: content_type.clone(),
            })?;

        if let Some(size) = response.content_length() {
            check_size(size, self.max_bytes)?;
        }
        // Content-Length may be missing or wrong; never buffer past the cap
        let mut bytes = Vec::new();
        response
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)?;
        check_size(bytes.len() as u64, self.max_bytes)?;

        log::debug!("Fetched {} ({}, {} bytes)", url, mime_type, bytes.len());
        Ok(FetchedImage { mime_type, bytes })
    }
}

/// Accept only absolute http(s) URLs.
pub fn parse_image_url(url: &str) -> Result<reqwest::Url, FetchError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(FetchError::InvalidUrl(url.to_string())),
    }
}

/// Extract the `image/*` MIME type from a Content-Type header value.
pub fn image_mime_type(content_type: &str) -> Option<String> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    match mime.strip_prefix("image/") {
        Some(sub) if !sub.is_empty() => Some(mime),
        _ => None,
    }
}

fn check_size(size: u64, limit: u64) -> Result<(), FetchError> {
    if size > limit {
        return Err(FetchError::TooLarge { size, limit });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
