//! Business logic services.

pub mod auth;
pub mod content_api;
pub mod editor;

pub use auth::{AuthError, AuthGate, AuthState, CredentialVerifier, StaticCredentials};
pub use content_api::{ContentApi, ContentApiError, HttpContentApi, LocalContentApi};
pub use editor::{AdminController, EditorError, FLASH_DISMISS_MS, SaveOutcome};
