//! Content API.
//!
//! `GET /api/stories` returns the whole document; `POST /api/stories`
//! replaces it. There is no partial update and no revision check.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tales_core::{Document, Story};
use tower_http::cors::CorsLayer;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Rejection message when the body lacks either required field.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Categories and stories are required";

/// Message returned after a successful save.
pub const SAVED_MESSAGE: &str = "Stories saved successfully";

/// Body accepted by `POST /api/stories`.
///
/// Fields are optional here so a missing or `null` field is reported with
/// [`REQUIRED_FIELDS_MESSAGE`] instead of a generic decode error. Keys
/// other than these three are stored as sent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStoriesRequest {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub stories: Option<IndexMap<String, Vec<Story>>>,
    #[serde(default)]
    pub category_images: Option<IndexMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body returned after a successful save.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveStoriesResponse {
    pub success: bool,
    pub message: String,
}

/// Build the content API router. CORS is open on these routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stories", get(get_stories).post(save_stories))
        .layer(CorsLayer::permissive())
}

/// Return the current document.
///
/// GET /api/stories
#[instrument(skip(state))]
async fn get_stories(State(state): State<AppState>) -> Result<Json<Document>, AppError> {
    let document = state.store().fetch_document().await?;
    Ok(Json(document))
}

/// Replace the whole document.
///
/// POST /api/stories
///
/// A rejected request never touches the content file.
#[instrument(skip(state, payload))]
async fn save_stories(
    State(state): State<AppState>,
    payload: Result<Json<SaveStoriesRequest>, JsonRejection>,
) -> Result<Json<SaveStoriesResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected content body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let (Some(categories), Some(stories)) = (request.categories, request.stories) else {
        return Err(AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    let document = Document {
        categories,
        stories,
        category_images: request.category_images,
        extra: request.extra,
    };

    state.store().replace_document(&document).await?;

    for issue in document.check_references() {
        tracing::warn!(%issue, "Saved content has a reference issue");
    }
    tracing::info!(
        categories = document.categories.len(),
        stories = document.story_count(),
        "Stories saved"
    );

    Ok(Json(SaveStoriesResponse {
        success: true,
        message: SAVED_MESSAGE.to_string(),
    }))
}
