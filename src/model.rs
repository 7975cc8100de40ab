use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Media type requested from the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    /// Video merged to MP4 by the backend
    Video,
    /// Audio extracted to MP3 by the backend
    Audio,
}

impl MediaFormat {
    /// Base name of the saved file, before any extension
    pub fn file_stem(self) -> &'static str {
        match self {
            MediaFormat::Video => "youtube_video",
            MediaFormat::Audio => "youtube_audio",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaFormat::Video => "video",
            MediaFormat::Audio => "audio",
        })
    }
}

/// JSON body sent to the backend, one per button click
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    /// Validated YouTube URL
    pub url: String,
    /// Requested media type
    pub format: MediaFormat,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, format: MediaFormat) -> Self {
        Self {
            url: url.into(),
            format,
        }
    }
}

/// Successful backend response: an opaque blob plus its declared type
#[derive(Clone, Debug, Default)]
pub struct DownloadedMedia {
    pub bytes: Vec<u8>,
    /// Raw `Content-Type` header, if the backend sent one
    pub content_type: Option<String>,
}

/// Lifecycle of the most recent request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing dispatched yet
    #[default]
    Idle,
    /// Waiting on the backend
    InFlight,
    /// File written to the given path
    Succeeded(PathBuf),
    /// Attempt ended with the given status text
    Failed(String),
}

/// Visual category of a status line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// The single status line shown under the buttons; hidden when empty
#[derive(Clone, Debug, Default)]
pub struct StatusRegion {
    message: Option<StatusMessage>,
}

impl StatusRegion {
    pub fn show_info(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Info, text.into());
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Error, text.into());
    }

    pub fn show_success(&mut self, text: impl Into<String>) {
        self.show(StatusKind::Success, text.into());
    }

    /// Current message, `None` when the region is hidden
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    fn show(&mut self, kind: StatusKind, text: String) {
        self.message = Some(StatusMessage { kind, text });
    }
}
