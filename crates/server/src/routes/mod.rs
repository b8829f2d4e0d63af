//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//! GET  /health/ready                        - Content file parses
//!
//! # Content API (CORS open)
//! GET  /api/stories                         - Whole document
//! POST /api/stories                         - Replace whole document
//!
//! # Public site
//! GET  /                                    - Category grid
//! GET  /category/{name}                     - Stories in a category
//! GET  /story/{category}/{id}?page=N        - Reader
//!
//! # Auth
//! GET  /admin/login                         - Login page
//! POST /admin/login                         - Login action
//! POST /admin/logout                        - Logout action
//!
//! # Admin (requires auth)
//! GET  /admin                               - Story form and list
//! POST /admin/stories                       - Create or update a story
//! GET  /admin/stories/{category}/{id}/delete - Delete confirmation
//! POST /admin/stories/{category}/{id}/delete - Delete a story
//! GET  /admin/backup                        - Download stories.json
//! ```

pub mod admin;
pub mod api;
pub mod auth;
pub mod category;
pub mod home;
pub mod story;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Generic not-found page.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

/// Link to a category page.
#[must_use]
pub fn category_href(category: &str) -> String {
    format!("/category/{}", urlencoding::encode(category))
}

/// Link to the first page of a story.
#[must_use]
pub fn story_href(category: &str, id: &str) -> String {
    format!(
        "/story/{}/{}",
        urlencoding::encode(category),
        urlencoding::encode(id)
    )
}

/// Build the full route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(api::router())
        .route("/", get(home::index))
        .route("/category/{name}", get(category::show))
        .route("/story/{category}/{id}", get(story::show))
        .merge(admin_routes())
        .fallback(not_found)
}

/// Login, logout and the guarded admin panel.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin", get(admin::index))
        .route("/admin/stories", post(admin::save))
        .route(
            "/admin/stories/{category}/{id}/delete",
            get(admin::confirm_delete).post(admin::delete),
        )
        .route("/admin/backup", get(admin::backup))
}

/// Any unmatched path.
async fn not_found() -> (StatusCode, NotFoundTemplate) {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            message: "Page not found.".to_string(),
        },
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the content file cannot be read or parsed.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().fetch_document().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
