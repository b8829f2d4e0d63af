//! File-backed content store.
//!
//! The whole [`Document`] lives in one pretty-printed JSON file. Reads parse
//! the file fresh every time; writes replace it in full.
//!
//! There is no locking and no revision check: two concurrent writers race and
//! the later write wins in full, silently discarding the earlier one. This is
//! acceptable for a single-admin site and must be kept in mind before adding
//! more editors.

use std::path::{Path, PathBuf};

use tales_core::Document;
use thiserror::Error;
use uuid::Uuid;

/// Errors from reading or writing the content file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether the error happened while loading rather than saving.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}

/// The JSON file holding the site's [`Document`].
#[derive(Debug, Clone)]
pub struct ContentStore {
    path: PathBuf,
}

impl ContentStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the content file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file is missing or unreadable and
    /// `StoreError::Parse` if it is not a valid document.
    pub async fn fetch_document(&self) -> Result<Document, StoreError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the content file with `document`.
    ///
    /// The document is written pretty-printed (2-space indent) to a sibling
    /// temporary file which is then renamed over the target, so a reader
    /// never sees a half-written file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the directory or file cannot be written.
    pub async fn replace_document(&self, document: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document).map_err(StoreError::Serialize)?;
        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, json).await.map_err(write_error)?;

        if let Err(source) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(write_error(source));
        }

        tracing::debug!(path = %self.path.display(), "Content file replaced");
        Ok(())
    }

    /// Whether the content file exists.
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }
}
