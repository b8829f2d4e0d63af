//! Session middleware configuration.
//!
//! Sessions are held in memory and the cookie has no expiry, so a login
//! lasts until the browser session ends or the server restarts.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::SiteConfig;
use crate::models::{Flash, session_keys};

/// Session cookie name for the admin panel.
pub const SESSION_COOKIE_NAME: &str = "tales_admin_session";

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &SiteConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Store a status message for the next admin page render.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(session: &Session, flash: Flash) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, flash).await
}

/// Remove and return the pending status message, if any.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    session.remove::<Flash>(session_keys::FLASH).await
}
