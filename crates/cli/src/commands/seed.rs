//! Create a new content file.

use std::path::Path;

use tales_core::Document;
use tales_server::store::ContentStore;
use tracing::info;

use super::CommandError;

/// Write a document with `categories` and an empty story list for each.
///
/// # Errors
///
/// Returns `CommandError::AlreadyExists` if the file exists and `force` is
/// false, or `CommandError::Store` if it cannot be written.
pub async fn run(path: &Path, categories: Vec<String>, force: bool) -> Result<(), CommandError> {
    let store = ContentStore::new(path);
    if store.exists().await && !force {
        return Err(CommandError::AlreadyExists(path.to_path_buf()));
    }

    let document = seed_document(categories);
    store.replace_document(&document).await?;

    info!(
        path = %path.display(),
        categories = document.categories.len(),
        "Content file created"
    );
    Ok(())
}

/// Document listing `categories` once each, in order, with empty lists.
fn seed_document(categories: Vec<String>) -> Document {
    let mut unique: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories {
        let category = category.trim().to_string();
        if !category.is_empty() && !unique.contains(&category) {
            unique.push(category);
        }
    }

    let mut document = Document::with_categories(unique);
    for category in &document.categories {
        document.stories.insert(category.clone(), Vec::new());
    }
    document
}
