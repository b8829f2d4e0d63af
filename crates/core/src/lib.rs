//! Tales Core - Shared story catalog library.
//!
//! This crate provides the domain used across all Tales components:
//! - `server` - Public story site, content API and admin panel
//! - `cli` - Command-line tools for seeding, checking and editing content
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. Persistence lives in the server crate behind the content store.
//!
//! # Modules
//!
//! - [`types`] - The persisted `Document`, `Story` and `StoryId`
//! - [`catalog`] - Story id generation and create/update/delete merging
//! - [`paginate`] - Word-count pagination for the reader

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod paginate;
pub mod types;

pub use catalog::{CatalogError, EditingStory, StoryDraft, ValidationError, generate_story_id};
pub use paginate::{Reader, WORDS_PER_PAGE, paginate};
pub use types::*;
