//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::services::{AuthGate, LocalContentApi};
use crate::store::ContentStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    store: ContentStore,
    auth: AuthGate,
}

impl AppState {
    /// Create state for `config`, using its data path and admin credentials.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let store = ContentStore::new(config.data_path.clone());
        let auth = AuthGate::from_credentials(config.admin.clone());
        Self::with_parts(config, store, auth)
    }

    /// Create state from explicit parts.
    #[must_use]
    pub fn with_parts(config: SiteConfig, store: ContentStore, auth: AuthGate) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                auth,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// The content file every view reads from.
    #[must_use]
    pub fn store(&self) -> &ContentStore {
        &self.inner.store
    }

    #[must_use]
    pub fn auth(&self) -> &AuthGate {
        &self.inner.auth
    }

    /// In-process content API for the admin controller.
    #[must_use]
    pub fn content_api(&self) -> LocalContentApi {
        LocalContentApi::new(self.inner.store.clone())
    }
}
