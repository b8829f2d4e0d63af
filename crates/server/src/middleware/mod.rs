//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (in-memory tower-sessions)
//!
//! Admin routes are guarded per handler with [`RequireAdminAuth`].

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    LOGIN_PATH, OptionalAdminAuth, RequireAdminAuth, auth_state, clear_current_admin,
    set_current_admin,
};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, set_flash, take_flash};
