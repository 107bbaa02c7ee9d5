//! Writes downloaded image bytes to their album-aware location.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::task::ImageTask;

use super::PersistError;
use super::filename::{sanitize_component, sanitize_filename};

/// Saves task content under a base directory.
///
/// Safe to share between concurrent download workers: creating an album
/// directory that already exists is not an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct PersistenceSink;

impl PersistenceSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Directory the task's file goes into.
    #[must_use]
    pub fn target_dir(task: &ImageTask, base_save_path: &Path) -> PathBuf {
        match task.album_name() {
            Some(album) => base_save_path.join(sanitize_component(album)),
            None => base_save_path.to_path_buf(),
        }
    }

    /// Full path the task's file is written to, given its downloaded bytes.
    #[must_use]
    pub fn target_path(task: &ImageTask, content: &[u8], base_save_path: &Path) -> PathBuf {
        let filename = sanitize_filename(&task.naming.resolve(&task.url, content));
        Self::target_dir(task, base_save_path).join(filename)
    }

    /// Writes `content` for `task` and returns the written path.
    ///
    /// An existing file at that path is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] when the directory cannot be created or
    /// the file cannot be written.
    pub async fn save(
        &self,
        task: &ImageTask,
        content: &[u8],
        base_save_path: &Path,
    ) -> Result<PathBuf, PersistError> {
        let dir = Self::target_dir(task, base_save_path);
        if task.placement.is_some() {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|error| PersistError::io(&dir, error))?;
        }

        let path = Self::target_path(task, content, base_save_path);
        tokio::fs::write(&path, content)
            .await
            .map_err(|error| PersistError::io(&path, error))?;
        debug!(
            url = %task.url,
            path = %path.display(),
            bytes = content.len(),
            "saved image"
        );
        Ok(path)
    }
}
