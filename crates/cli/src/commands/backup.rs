//! Download the server's document.

use std::path::PathBuf;

use chrono::Utc;
use tales_server::services::{ContentApi, HttpContentApi};
use tracing::info;

use super::CommandError;

/// Default backup file name for the current time.
fn default_output() -> PathBuf {
    PathBuf::from(format!(
        "stories-backup-{}.json",
        Utc::now().format("%Y%m%d-%H%M%S")
    ))
}

/// Fetch the whole document and write it pretty-printed to `output`.
///
/// # Errors
///
/// Returns `CommandError::Api` if the server cannot be reached or answers
/// with an error, and `CommandError::Write` if the file cannot be written.
pub async fn run(api_url: &str, output: Option<PathBuf>) -> Result<(), CommandError> {
    let api = HttpContentApi::new(api_url)?;
    let document = api.fetch_document().await?;

    let path = output.unwrap_or_else(default_output);
    let json = serde_json::to_string_pretty(&document)?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|source| CommandError::Write {
            path: path.clone(),
            source,
        })?;

    info!(
        path = %path.display(),
        stories = document.story_count(),
        "Backup written"
    );
    Ok(())
}
