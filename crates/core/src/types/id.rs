//! Story identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a story within its category.
///
/// Ids are slugs such as `horror-my-tale` or `horror-my-tale-1`. They are
/// only unique inside one category's story list, never globally, so a
/// `StoryId` is meaningful only together with a category name.
///
/// ## Examples
///
/// ```
/// use tales_core::StoryId;
///
/// let id = StoryId::new("horror-my-tale");
/// assert_eq!(id.as_str(), "horror-my-tale");
/// assert_eq!(id.to_string(), "horror-my-tale");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Create a story id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StoryId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StoryId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
