//! Category page: the stories in one category.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tales_core::Story;
use tracing::instrument;

use super::story_href;
use crate::error::AppError;
use crate::state::AppState;

/// Story card on a category page.
#[derive(Debug, Clone)]
pub struct StoryCard {
    pub title: String,
    pub href: String,
    pub image: String,
    pub excerpt: String,
}

impl StoryCard {
    /// Card for `story` as listed under `category`.
    ///
    /// The link uses the list the story is stored under, not its
    /// `category` field.
    fn new(category: &str, story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            href: story_href(category, story.id.as_str()),
            image: story.image.clone(),
            excerpt: story.excerpt().to_string(),
        }
    }
}

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub name: String,
    /// Shown in place of a story image that fails to load.
    pub fallback_image: String,
    pub stories: Vec<StoryCard>,
}

/// List the stories in a category.
///
/// An unknown category renders the same empty state as an empty one.
///
/// GET /category/{name}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let document = state.store().fetch_document().await?;

    let stories = document
        .stories_in(&name)
        .iter()
        .map(|story| StoryCard::new(&name, story))
        .collect();

    Ok(CategoryTemplate {
        fallback_image: document.category_image(&name).to_string(),
        name,
        stories,
    })
}
