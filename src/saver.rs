//! Client-side "save as" for downloaded blobs.

use std::fs;
use std::path::{Path, PathBuf};

use rfd::FileDialog;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Where a finished download ends up. Called on the UI thread.
pub trait FileSaver {
    /// Stores `bytes`, offering `suggested_name`, and returns the final path.
    fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Native save-as dialog, the desktop counterpart of a browser download prompt
pub struct DialogSaver {
    start_dir: PathBuf,
}

impl DialogSaver {
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
        }
    }
}

impl FileSaver for DialogSaver {
    fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = FileDialog::new()
            .set_directory(&self.start_dir)
            .set_file_name(suggested_name)
            .save_file()
            .ok_or(Error::SaveCancelled)?;

        fs::write(&path, bytes)?;
        info!(path = %path.display(), size = bytes.len(), "saved download");
        Ok(path)
    }
}

/// Writes straight into a directory without asking
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = unique_path(&self.dir.join(suggested_name));

        fs::write(&path, bytes)?;
        info!(path = %path.display(), size = bytes.len(), "saved download");
        Ok(path)
    }
}

/// First free path among `name.ext`, `name (1).ext`, `name (2).ext`, ...
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1u32;
    loop {
        let candidate = parent.join(format!("{stem} ({counter}){extension}"));
        if !candidate.exists() {
            debug!(original = %path.display(), renamed = %candidate.display(), "name taken, renaming");
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_saver_writes_under_suggested_name() {
        let temp_dir = TempDir::new().unwrap();
        let saver = DirectorySaver::new(temp_dir.path());

        let path = saver.save("youtube_video.mp4", b"blob").unwrap();

        assert_eq!(path, temp_dir.path().join("youtube_video.mp4"));
        assert_eq!(fs::read(&path).unwrap(), b"blob");
    }

    #[test]
    fn directory_saver_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let saver = DirectorySaver::new(temp_dir.path().join("nested").join("downloads"));

        let path = saver.save("youtube_audio.mp3", b"x").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn directory_saver_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let saver = DirectorySaver::new(temp_dir.path());

        let first = saver.save("youtube_audio.mp3", b"one").unwrap();
        let second = saver.save("youtube_audio.mp3", b"two").unwrap();
        let third = saver.save("youtube_audio.mp3", b"three").unwrap();

        assert_eq!(second, temp_dir.path().join("youtube_audio (1).mp3"));
        assert_eq!(third, temp_dir.path().join("youtube_audio (2).mp3"));
        assert_eq!(fs::read(first).unwrap(), b"one");
    }

    #[test]
    fn unique_path_handles_names_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("youtube_video");
        fs::write(&path, "taken").unwrap();

        assert_eq!(unique_path(&path), temp_dir.path().join("youtube_video (1)"));
    }
}
