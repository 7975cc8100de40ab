//! Error types for the download client.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the client
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when the backend fails without saying why
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown error occurred from server.";

/// Everything that can end a download attempt (or startup).
///
/// The `Display` text of the download-time variants is exactly what the
/// status region shows after the `Download failed: ` prefix.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing was typed into the URL field
    #[error("Please enter a YouTube URL.")]
    EmptyInput,

    /// Input does not look like a YouTube link
    #[error("Invalid YouTube URL format. Please provide a valid YouTube link.")]
    InvalidUrl,

    /// The backend answered with a non-success status
    #[error("{0}")]
    Backend(String),

    /// The request never produced a usable response
    #[error("{0}")]
    Transport(String),

    /// The user dismissed the save dialog
    #[error("Save cancelled.")]
    SaveCancelled,

    /// Writing the downloaded file failed
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be used
    #[error("configuration error in {path}: {message}")]
    Config {
        /// File the setting came from
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },
}

impl Error {
    /// Whether the error was raised before any network activity.
    pub fn is_local(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InvalidUrl)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
