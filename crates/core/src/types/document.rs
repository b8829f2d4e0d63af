//! The persisted content document.
//!
//! The whole site is one JSON file:
//!
//! ```json
//! {
//!   "categories": ["Horror", "Romance"],
//!   "stories": {
//!     "Horror": [{ "id": "horror-night", "title": "Night", ... }]
//!   }
//! }
//! ```
//!
//! Older files carry a `categoryImages` map instead of `categories`; its keys
//! then serve as the category list. Files with neither fall back to the
//! `stories` keys. Key order is preserved as written in the file, and keys
//! Tales does not know about are written back unchanged.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::StoryId;
use super::story::Story;

/// Thumbnail shown on the home page for a category without stories.
pub const DEFAULT_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=400&h=300&fit=crop";

/// Fallback image for a category without a `categoryImages` entry.
pub const DEFAULT_CATEGORY_IMAGE: &str = "/images/categories/default.png";

/// The entire persisted state: ordered categories plus stories per category.
///
/// Loaded wholesale, mutated wholesale, written back wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDocument", rename_all = "camelCase")]
pub struct Document {
    /// Category names in display order.
    pub categories: Vec<String>,
    /// Stories keyed by category name, in file order.
    pub stories: IndexMap<String, Vec<Story>>,
    /// Optional per-category cover image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_images: Option<IndexMap<String, String>>,
    /// Other top-level keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// On-disk shape before the category list is resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    stories: IndexMap<String, Vec<Story>>,
    #[serde(default)]
    category_images: Option<IndexMap<String, String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let categories = match (raw.categories, &raw.category_images) {
            (Some(categories), _) => categories,
            (None, Some(images)) => images.keys().cloned().collect(),
            (None, None) => raw.stories.keys().cloned().collect(),
        };

        Self {
            categories,
            stories: raw.stories,
            category_images: raw.category_images,
            extra: raw.extra,
        }
    }
}

/// A referential inconsistency between `categories` and `stories`.
///
/// These are reported, never repaired: stories are not dropped because their
/// category is missing from the list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceIssue {
    /// A `stories` key that is not listed in `categories`.
    #[error("stories are stored under '{0}', which is not a listed category")]
    UnlistedCategory(String),
    /// A story whose `category` field differs from the key it is stored under.
    #[error("story '{id}' is stored under '{key}' but names category '{category}'")]
    CategoryMismatch {
        key: String,
        id: StoryId,
        category: String,
    },
    /// Two stories in one category share an id.
    #[error("story id '{id}' appears more than once in '{category}'")]
    DuplicateId { category: String, id: StoryId },
}

impl Document {
    /// Create a document with the given categories and no stories.
    #[must_use]
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Stories in a category, empty when the category has no list.
    #[must_use]
    pub fn stories_in(&self, category: &str) -> &[Story] {
        self.stories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a story by category and id.
    #[must_use]
    pub fn find_story(&self, category: &str, id: &str) -> Option<&Story> {
        self.stories_in(category).iter().find(|s| s.id == id)
    }

    /// Whether a category is listed in `categories`.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Total number of stories across every category.
    #[must_use]
    pub fn story_count(&self) -> usize {
        self.stories.values().map(Vec::len).sum()
    }

    /// Image used for a category tile: its first story's image, or the default.
    #[must_use]
    pub fn category_thumbnail(&self, category: &str) -> &str {
        self.stories_in(category)
            .first()
            .map_or(DEFAULT_THUMBNAIL, |s| s.image.as_str())
    }

    /// Cover image for a category page, used when a story image fails.
    #[must_use]
    pub fn category_image(&self, category: &str) -> &str {
        self.category_images
            .as_ref()
            .and_then(|images| images.get(category))
            .map_or(DEFAULT_CATEGORY_IMAGE, String::as_str)
    }

    /// Report every referential inconsistency in the document.
    #[must_use]
    pub fn check_references(&self) -> Vec<ReferenceIssue> {
        let mut issues = Vec::new();

        for (key, stories) in &self.stories {
            if !self.has_category(key) {
                issues.push(ReferenceIssue::UnlistedCategory(key.clone()));
            }

            let mut seen = HashSet::new();
            for story in stories {
                if story.category != *key {
                    issues.push(ReferenceIssue::CategoryMismatch {
                        key: key.clone(),
                        id: story.id.clone(),
                        category: story.category.clone(),
                    });
                }
                if !seen.insert(story.id.as_str()) {
                    issues.push(ReferenceIssue::DuplicateId {
                        category: key.clone(),
                        id: story.id.clone(),
                    });
                }
            }
        }

        issues
    }
}
