//! Story create/update/delete merging.
//!
//! Every change is applied to a whole [`Document`]: the caller clones the
//! loaded document, applies one story-level change here and persists the
//! result. Nothing in this module performs I/O.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Map;
use url::Url;

use crate::types::{Document, Story, StoryId};

/// Maximum number of characters of the slugged title used in a story id.
pub const TITLE_SLUG_MAX_CHARS: usize = 20;

/// Matches a run of whitespace, collapsed to one hyphen in ids.
static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Form fields for creating or editing a story. All four are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoryDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub content: String,
}

/// Reference to the story being edited.
///
/// `original_category` is where the story lives now; when the draft names a
/// different category the story is moved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditingStory {
    pub id: StoryId,
    pub original_category: String,
}

/// A draft rejected before any persistence is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("image must be an http(s) URL or a site path, got '{0}'")]
    InvalidImage(String),
}

/// Errors from applying a change to a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("story '{id}' not found in '{category}'")]
    NotFound { category: String, id: StoryId },
}

impl StoryDraft {
    /// Check required fields, the category and the image reference.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking fields in form order.
    pub fn validate(&self, document: &Document) -> Result<(), ValidationError> {
        let fields = [
            ("title", &self.title),
            ("category", &self.category),
            ("image", &self.image),
            ("content", &self.content),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }

        if !document.has_category(&self.category) {
            return Err(ValidationError::UnknownCategory(self.category.clone()));
        }

        if !is_image_reference(&self.image) {
            return Err(ValidationError::InvalidImage(self.image.clone()));
        }

        Ok(())
    }
}

/// Accepts absolute http(s) URLs and site-relative paths.
fn is_image_reference(image: &str) -> bool {
    if image.starts_with('/') && !image.starts_with("//") {
        return true;
    }
    Url::parse(image).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Lowercase and replace each whitespace run with a hyphen.
fn hyphenate(value: &str) -> String {
    WHITESPACE_RUN_RE
        .replace_all(&value.to_lowercase(), "-")
        .into_owned()
}

/// The id a story would get in an empty category.
///
/// `"Horror"`, `"My Tale"` becomes `horror-my-tale`. The title part is cut to
/// [`TITLE_SLUG_MAX_CHARS`] characters after hyphenation.
#[must_use]
pub fn base_story_id(category: &str, title: &str) -> String {
    let title_slug: String = hyphenate(title).chars().take(TITLE_SLUG_MAX_CHARS).collect();
    format!("{}-{}", hyphenate(category), title_slug)
}

/// Generate an id unique within `existing`, the target category's stories.
///
/// Collisions get `-1`, `-2`, ... appended, using the first free counter.
///
/// ```
/// use tales_core::{Story, StoryId, generate_story_id};
///
/// let id = generate_story_id(&[], "Horror", "My Tale");
/// assert_eq!(id.as_str(), "horror-my-tale");
/// ```
#[must_use]
pub fn generate_story_id(existing: &[Story], category: &str, title: &str) -> StoryId {
    let base = base_story_id(category, title);
    let taken = |candidate: &str| existing.iter().any(|s| s.id == candidate);

    if !taken(&base) {
        return StoryId::new(base);
    }

    let mut counter: u32 = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken(&candidate) {
            return StoryId::new(candidate);
        }
        counter += 1;
    }
}

impl Document {
    /// Create a story, or update the one referenced by `editing`.
    ///
    /// - Create appends to the category list with a freshly generated id.
    /// - Update in the same category keeps the id (even if the title changed)
    ///   and replaces the story at its position.
    /// - Update into another category moves the story to the end of the new
    ///   list, keeping its id unless it collides there.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for an incomplete or invalid draft
    /// and `CatalogError::NotFound` if the edited story no longer exists. The
    /// document is unchanged on error.
    pub fn upsert_story(
        &mut self,
        draft: StoryDraft,
        editing: Option<&EditingStory>,
    ) -> Result<Story, CatalogError> {
        draft.validate(self)?;
        let StoryDraft {
            title,
            category,
            image,
            content,
        } = draft;

        let Some(editing) = editing else {
            let id = generate_story_id(self.stories_in(&category), &category, &title);
            let story = Story {
                id,
                title,
                category,
                image,
                content,
                extra: Map::new(),
            };
            self.stories
                .entry(story.category.clone())
                .or_default()
                .push(story.clone());
            return Ok(story);
        };

        let not_found = || CatalogError::NotFound {
            category: editing.original_category.clone(),
            id: editing.id.clone(),
        };

        let original = self
            .stories
            .get_mut(&editing.original_category)
            .ok_or_else(not_found)?;
        let index = original
            .iter()
            .position(|s| s.id == editing.id)
            .ok_or_else(not_found)?;

        if editing.original_category == category {
            let Some(slot) = original.get_mut(index) else {
                return Err(not_found());
            };
            let story = Story {
                id: editing.id.clone(),
                title,
                category,
                image,
                content,
                extra: std::mem::take(&mut slot.extra),
            };
            *slot = story.clone();
            return Ok(story);
        }

        let previous = original.remove(index);
        let target = self.stories_in(&category);
        let id = if target.iter().any(|s| s.id == editing.id) {
            generate_story_id(target, &category, &title)
        } else {
            editing.id.clone()
        };
        let story = Story {
            id,
            title,
            category,
            image,
            content,
            extra: previous.extra,
        };
        self.stories
            .entry(story.category.clone())
            .or_default()
            .push(story.clone());
        Ok(story)
    }

    /// Remove every story with `id` from one category's list.
    ///
    /// Other categories are untouched, even if they hold the same id. A
    /// missing category or id is not an error; nothing is returned.
    pub fn remove_story(&mut self, category: &str, id: &str) -> Vec<Story> {
        let Some(list) = self.stories.get_mut(category) else {
            return Vec::new();
        };
        let (removed, kept) = std::mem::take(list).into_iter().partition(|s| s.id == id);
        *list = kept;
        removed
    }
}
