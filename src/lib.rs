//! Desktop client for a remote YouTube download service.
//!
//! The window collects a URL and a media type, the [`controller`] validates
//! the input and sends one request to the backend, and the returned blob is
//! handed to a [`saver::FileSaver`].

/// Optional YAML settings
pub mod config;
/// Click handling and status reporting
pub mod controller;
/// HTTP request/response handling for the backend
pub mod downloader;
/// Error types
pub mod error;
/// Request, response and status types
pub mod model;
/// Save-as handling for downloaded blobs
pub mod saver;
/// Pre-flight URL check
pub mod validation;

pub use error::{Error, Result};
