//! Story reader.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tales_core::{Reader, Story};
use tracing::instrument;

use super::{NotFoundTemplate, category_href, story_href};
use crate::error::AppError;
use crate::state::AppState;

/// Message on the page for a missing story.
pub const STORY_NOT_FOUND_MESSAGE: &str = "Story not found.";

/// Query parameters for the reader.
#[derive(Debug, Deserialize)]
pub struct ReaderQuery {
    /// 1-based page, clamped into range.
    pub page: Option<usize>,
}

/// Reader page template.
#[derive(Template, WebTemplate)]
#[template(path = "story.html")]
pub struct StoryTemplate {
    pub title: String,
    pub category: String,
    pub image: String,
    pub category_href: String,
    pub paragraphs: Vec<String>,
    pub current_page: usize,
    pub page_count: usize,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    /// First page link for "Read Again".
    pub first_href: String,
    pub is_last_page: bool,
    pub is_empty: bool,
}

impl StoryTemplate {
    fn new(category: &str, story: &Story, reader: &Reader) -> Self {
        let base = story_href(category, story.id.as_str());
        let page_href = |page: usize| format!("{base}?page={page}");

        Self {
            title: story.title.clone(),
            category: category.to_string(),
            image: story.image.clone(),
            category_href: category_href(category),
            paragraphs: reader.paragraphs().into_iter().map(String::from).collect(),
            current_page: reader.current_page(),
            page_count: reader.page_count(),
            previous_href: reader.previous_page().map(page_href),
            next_href: reader.next_page().map(page_href),
            first_href: page_href(1),
            is_last_page: reader.is_last_page(),
            is_empty: reader.is_empty(),
        }
    }
}

/// Show one page of a story.
///
/// GET /story/{category}/{id}?page=N
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
    Query(query): Query<ReaderQuery>,
) -> Result<Response, AppError> {
    let document = state.store().fetch_document().await?;

    let Some(story) = document.find_story(&category, &id) else {
        return Ok((
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                message: STORY_NOT_FOUND_MESSAGE.to_string(),
            },
        )
            .into_response());
    };

    let reader = Reader::new(&story.content).at(query.page.unwrap_or(1));
    Ok(StoryTemplate::new(&category, story, &reader).into_response())
}
