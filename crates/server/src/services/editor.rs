//! Admin story editing.
//!
//! [`AdminController`] holds the loaded document and applies one change at a
//! time through a [`ContentApi`]. Every change is made on a copy and only
//! committed to memory once the whole document has been persisted, so a
//! failed save leaves the controller exactly as it was.

use tales_core::{CatalogError, Document, EditingStory, Story, StoryDraft, StoryId, ValidationError};
use thiserror::Error;

use super::content_api::{ContentApi, ContentApiError};

/// How long the admin page shows a status message, in milliseconds.
pub const FLASH_DISMISS_MS: u32 = 3000;

/// Errors from admin editing operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The draft was rejected before anything was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The story being edited no longer exists.
    #[error("story '{id}' not found in '{category}'")]
    NotFound { category: String, id: StoryId },

    /// The document could not be loaded.
    #[error("failed to load stories: {0}")]
    Load(#[source] ContentApiError),

    /// The document could not be saved; the change was discarded.
    #[error("failed to save stories: {0}")]
    Persistence(#[source] ContentApiError),
}

impl From<CatalogError> for EditorError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => Self::Validation(e),
            CatalogError::NotFound { category, id } => Self::NotFound { category, id },
        }
    }
}

/// Whether a save created a new story or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    Updated,
}

impl SaveOutcome {
    /// Status message shown after the save.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Added => "Story added successfully! File saved automatically.",
            Self::Updated => "Story updated successfully! File saved automatically.",
        }
    }
}

/// Story CRUD over a [`ContentApi`].
#[derive(Debug)]
pub struct AdminController<A> {
    api: A,
    document: Document,
}

impl<A: ContentApi> AdminController<A> {
    /// Fetch a fresh document and start editing it.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Load` if the document cannot be fetched.
    pub async fn load(api: A) -> Result<Self, EditorError> {
        let document = api.fetch_document().await.map_err(EditorError::Load)?;
        Ok(Self { api, document })
    }

    /// The last successfully loaded or persisted document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Create a story, or update the one referenced by `editing`.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Validation` for an invalid draft (nothing is
    /// sent), `EditorError::NotFound` if the edited story is gone, and
    /// `EditorError::Persistence` if the document could not be saved.
    pub async fn save_story(
        &mut self,
        draft: StoryDraft,
        editing: Option<&EditingStory>,
    ) -> Result<(Story, SaveOutcome), EditorError> {
        let outcome = if editing.is_some() {
            SaveOutcome::Updated
        } else {
            SaveOutcome::Added
        };

        let mut updated = self.document.clone();
        let story = updated.upsert_story(draft, editing)?;
        self.commit(updated).await?;

        tracing::info!(
            story_id = %story.id,
            category = %story.category,
            ?outcome,
            "Story saved"
        );
        Ok((story, outcome))
    }

    /// Remove every story with `id` from one category.
    ///
    /// Deleting a story that does not exist still persists the document and
    /// succeeds with nothing removed.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Persistence` if the document could not be saved.
    pub async fn delete_story(
        &mut self,
        id: &str,
        category: &str,
    ) -> Result<Vec<Story>, EditorError> {
        let mut updated = self.document.clone();
        let removed = updated.remove_story(category, id);
        self.commit(updated).await?;

        tracing::info!(story_id = %id, %category, removed = removed.len(), "Story deleted");
        Ok(removed)
    }

    async fn commit(&mut self, updated: Document) -> Result<(), EditorError> {
        self.api
            .replace_document(&updated)
            .await
            .map_err(EditorError::Persistence)?;
        self.document = updated;
        Ok(())
    }
}
