//! Home page: the category grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tales_core::Document;
use tracing::instrument;

use super::category_href;
use crate::error::AppError;
use crate::state::AppState;

/// One category tile.
#[derive(Debug, Clone)]
pub struct CategoryTile {
    pub name: String,
    pub href: String,
    pub thumbnail: String,
    pub count_label: String,
}

impl CategoryTile {
    fn new(document: &Document, name: &str) -> Self {
        Self {
            name: name.to_string(),
            href: category_href(name),
            thumbnail: document.category_thumbnail(name).to_string(),
            count_label: story_count_label(document.stories_in(name).len()),
        }
    }
}

/// "1 story", "3 stories".
#[must_use]
pub fn story_count_label(count: usize) -> String {
    if count == 1 {
        "1 story".to_string()
    } else {
        format!("{count} stories")
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryTile>,
}

/// Display every category with its thumbnail and story count.
///
/// GET /
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let document = state.store().fetch_document().await?;
    let categories = document
        .categories
        .iter()
        .map(|name| CategoryTile::new(&document, name))
        .collect();

    Ok(HomeTemplate { categories })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_count_label() {
        assert_eq!(story_count_label(0), "0 stories");
        assert_eq!(story_count_label(1), "1 story");
        assert_eq!(story_count_label(2), "2 stories");
    }
}
