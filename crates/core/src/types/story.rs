//! A single story in the catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::StoryId;

/// Number of characters shown in story excerpts on listing pages.
pub const EXCERPT_CHARS: usize = 150;

/// A story stored under its category in the [`Document`](super::Document).
///
/// `category` should match the key the story is stored under; the content
/// file does not enforce this (see [`Document::check_references`](super::Document::check_references)).
///
/// Fields other than the five below are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub category: String,
    /// Image URL, absolute (`https://...`) or site-relative (`/images/...`).
    pub image: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Story {
    /// First [`EXCERPT_CHARS`] characters of the content.
    #[must_use]
    pub fn excerpt(&self) -> &str {
        match self.content.char_indices().nth(EXCERPT_CHARS) {
            Some((end, _)) => self.content.get(..end).unwrap_or(&self.content),
            None => &self.content,
        }
    }
}
