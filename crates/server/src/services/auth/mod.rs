//! Admin authentication service.
//!
//! A single username/password pair unlocks the admin panel. The pair comes
//! from configuration and is checked through a [`CredentialVerifier`], so the
//! check can be swapped without touching the routes.

mod error;

pub use error::AuthError;

use secrecy::ExposeSecret;

use crate::config::AdminCredentials;
use crate::models::CurrentAdmin;

/// Decides whether a username/password pair is valid.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifier for the one configured admin login.
///
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: AdminCredentials,
}

impl StaticCredentials {
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.credentials.username
            && password == self.credentials.password.expose_secret()
    }
}

/// Whether the current request carries an admin login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(CurrentAdmin),
}

impl AuthState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub const fn admin(&self) -> Option<&CurrentAdmin> {
        match self {
            Self::Authenticated(admin) => Some(admin),
            Self::Unauthenticated => None,
        }
    }
}

impl From<Option<CurrentAdmin>> for AuthState {
    fn from(admin: Option<CurrentAdmin>) -> Self {
        admin.map_or(Self::Unauthenticated, Self::Authenticated)
    }
}

/// Admin login gate.
pub struct AuthGate {
    verifier: Box<dyn CredentialVerifier>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

impl AuthGate {
    #[must_use]
    pub fn new(verifier: impl CredentialVerifier + 'static) -> Self {
        Self {
            verifier: Box::new(verifier),
        }
    }

    /// Gate for the configured admin login.
    #[must_use]
    pub fn from_credentials(credentials: AdminCredentials) -> Self {
        Self::new(StaticCredentials::new(credentials))
    }

    /// Check a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` unless both values match.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<CurrentAdmin, AuthError> {
        if self.verifier.verify(username, password) {
            tracing::info!(%username, "Admin logged in");
            Ok(CurrentAdmin {
                username: username.to_string(),
            })
        } else {
            tracing::warn!(%username, "Admin login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}
