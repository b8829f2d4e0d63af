//! Core types for Tales.
//!
//! This module provides the persisted content model.

pub mod document;
pub mod id;
pub mod story;

pub use document::{DEFAULT_CATEGORY_IMAGE, DEFAULT_THUMBNAIL, Document, ReferenceIssue};
pub use id::StoryId;
pub use story::Story;
