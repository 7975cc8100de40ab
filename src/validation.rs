//! Pre-flight URL check, run before any request is built.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

// Host check only; video IDs and query parameters are left to the backend.
static YOUTUBE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/.+")
        .unwrap_or_else(|err| panic!("invalid YouTube URL pattern: {err}"))
});

/// Trims `raw` and returns it if it looks like a YouTube link.
pub fn validate_url(raw: &str) -> Result<String> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !YOUTUBE_URL.is_match(url) {
        return Err(Error::InvalidUrl);
    }
    Ok(url.to_string())
}
