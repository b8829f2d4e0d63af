//! Validate category references in a content file.

use std::path::Path;

use tales_server::store::ContentStore;
use tracing::{info, warn};

use super::CommandError;

/// Load the file and report every reference issue.
///
/// Nothing is repaired.
///
/// # Errors
///
/// Returns `CommandError::Store` if the file cannot be loaded and
/// `CommandError::ReferenceIssues` if any issue is found.
pub async fn run(path: &Path) -> Result<(), CommandError> {
    let document = ContentStore::new(path).fetch_document().await?;
    let issues = document.check_references();

    for issue in &issues {
        warn!("{issue}");
    }

    if issues.is_empty() {
        info!(
            path = %path.display(),
            categories = document.categories.len(),
            stories = document.story_count(),
            "Content file is consistent"
        );
        Ok(())
    } else {
        Err(CommandError::ReferenceIssues(issues.len()))
    }
}
