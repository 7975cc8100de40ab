//! Optional YAML settings for the client.
//!
//! Every field has a default, so a missing file (or a file naming only some
//! fields) is valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Looked up in the working directory at startup
pub const CONFIG_FILE: &str = "ytdl-client.yaml";

/// How a finished download is written to disk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// Ask with a native save-as dialog
    #[default]
    Dialog,
    /// Write into `download_dir` without asking
    Directory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend `/download` endpoint
    pub endpoint: String,
    pub save_mode: SaveMode,
    /// Dialog start directory, or the target directory in `directory` mode
    pub download_dir: PathBuf,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://localhost:5000/download".to_string(),
            save_mode: SaveMode::Dialog,
            download_dir: PathBuf::from("downloads"),
            log_filter: "info".to_string(),
        }
    }
}

/// Settings ready for use, returned by [`ClientConfig::load`]
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub settings: ClientConfig,
    /// `settings.endpoint`, already parsed and scheme-checked
    pub endpoint: Url,
    /// File the settings came from; `None` when defaults were used
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Whether requests will go out without TLS
    pub fn is_plaintext(&self) -> bool {
        self.endpoint.scheme() == "http"
    }
}

impl ClientConfig {
    /// Reads `path`, falling back to defaults when it does not exist.
    ///
    /// Runs before logging is set up, so nothing is logged here; callers
    /// report `source` and `is_plaintext` themselves.
    pub fn load(path: &Path) -> Result<LoadedConfig> {
        let (settings, source) = match fs::read_to_string(path) {
            Ok(raw) => {
                let settings = Self::parse(&raw).map_err(|err| config_error(path, err))?;
                (settings, Some(path.to_path_buf()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => (Self::default(), None),
            Err(err) => return Err(config_error(path, err)),
        };

        let endpoint = settings
            .endpoint_url()
            .map_err(|err| config_error(path, err))?;
        Ok(LoadedConfig {
            settings,
            endpoint,
            source,
        })
    }

    fn parse(raw: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes to null rather than an empty mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Parsed endpoint; only http and https are accepted.
    fn endpoint_url(&self) -> std::result::Result<Url, String> {
        let url = Url::parse(&self.endpoint)
            .map_err(|err| format!("invalid endpoint {:?}: {err}", self.endpoint))?;
        match url.scheme() {
            "https" | "http" => Ok(url),
            other => Err(format!("unsupported endpoint scheme {other:?}")),
        }
    }
}

fn config_error(path: &Path, err: impl ToString) -> Error {
    Error::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = ClientConfig::load(&temp_dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(loaded.settings, ClientConfig::default());
        assert_eq!(loaded.source, None);
        assert_eq!(loaded.endpoint.as_str(), "https://localhost:5000/download");
        assert!(!loaded.is_plaintext());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let (_dir, path) = write_config("\n");
        let loaded = ClientConfig::load(&path).unwrap();

        assert_eq!(loaded.settings, ClientConfig::default());
        assert_eq!(loaded.source, Some(path));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, path) = write_config(
            "endpoint: http://127.0.0.1:5000/download\nsave_mode: directory\n",
        );

        let loaded = ClientConfig::load(&path).unwrap();
        let config = &loaded.settings;

        assert_eq!(config.endpoint, "http://127.0.0.1:5000/download");
        assert_eq!(loaded.endpoint.port(), Some(5000));
        assert!(loaded.is_plaintext());
        assert_eq!(config.save_mode, SaveMode::Directory);
        assert_eq!(config.download_dir, PathBuf::from("downloads"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn rejects_malformed_yaml() {
        let (_dir, path) = write_config("save_mode: [unclosed\n");
        assert!(matches!(
            ClientConfig::load(&path),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn rejects_unknown_save_mode() {
        let (_dir, path) = write_config("save_mode: clipboard\n");
        assert!(matches!(
            ClientConfig::load(&path),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn rejects_bad_endpoints() {
        for endpoint in ["not a url", "ftp://example.com/download"] {
            let (_dir, path) = write_config(&format!("endpoint: \"{endpoint}\"\n"));
            let err = ClientConfig::load(&path).unwrap_err();
            assert!(
                matches!(err, Error::Config { ref path, .. } if path.ends_with(CONFIG_FILE)),
                "should reject {endpoint}"
            );
        }
    }

    #[test]
    fn default_endpoint_is_https() {
        let url = ClientConfig::default().endpoint_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.path(), "/download");
    }
}
