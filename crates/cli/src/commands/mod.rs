//! CLI command implementations.

pub mod backup;
pub mod check;
pub mod seed;
pub mod stories;

use std::path::PathBuf;

use tales_server::services::{ContentApiError, EditorError};
use tales_server::store::StoreError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Content file could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Server request failed.
    #[error(transparent)]
    Api(#[from] ContentApiError),

    /// Story edit was rejected or could not be saved.
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Refusing to overwrite an existing content file.
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    /// The content file has reference problems.
    #[error("{0} reference issue(s) found")]
    ReferenceIssues(usize),

    /// Local file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
