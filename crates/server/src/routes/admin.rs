//! Admin panel: story create/edit/delete and backup download.
//!
//! Every handler loads a fresh [`AdminController`] from the content store,
//! applies at most one change and reports the outcome as a flash message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tales_core::{Document, EditingStory, Story, StoryDraft, StoryId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, set_flash, take_flash};
use crate::models::{CurrentAdmin, Flash};
use crate::services::{AdminController, EditorError, FLASH_DISMISS_MS, LocalContentApi};
use crate::state::AppState;

use super::story::STORY_NOT_FOUND_MESSAGE;

const SAVE_FAILED_FLASH: &str = "Error saving story. The content file could not be written.";
const DELETE_FAILED_FLASH: &str = "Error deleting story. The content file could not be written.";
const LOAD_FAILED_FLASH: &str = "Error loading stories. The content file could not be read.";
const DELETED_FLASH: &str = "Story deleted successfully! File saved automatically.";

// =============================================================================
// View Types
// =============================================================================

/// Values shown in the story form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoryForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub content: String,
    /// Id of the story being edited; empty when adding.
    #[serde(default)]
    pub editing_id: String,
    /// Category the edited story is stored under.
    #[serde(default)]
    pub original_category: String,
}

impl StoryForm {
    fn editing(category: &str, story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            category: category.to_string(),
            image: story.image.clone(),
            content: story.content.clone(),
            editing_id: story.id.to_string(),
            original_category: category.to_string(),
        }
    }

    fn is_editing(&self) -> bool {
        !self.editing_id.is_empty()
    }

    fn editing_story(&self) -> Option<EditingStory> {
        self.is_editing().then(|| EditingStory {
            id: StoryId::new(self.editing_id.clone()),
            original_category: self.original_category.clone(),
        })
    }

    fn draft(&self) -> StoryDraft {
        StoryDraft {
            title: self.title.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            content: self.content.clone(),
        }
    }

    /// Character count shown under the content field.
    #[must_use]
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

/// One story row in the admin list.
#[derive(Debug, Clone)]
pub struct AdminStoryRow {
    pub title: String,
    pub excerpt: String,
    pub edit_href: String,
    pub delete_href: String,
}

/// Non-empty category with its stories.
#[derive(Debug, Clone)]
pub struct AdminCategorySection {
    pub name: String,
    pub stories: Vec<AdminStoryRow>,
}

/// Option in the category select.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Admin panel template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub flash_dismiss_ms: u32,
    pub form: StoryForm,
    pub category_options: Vec<CategoryOption>,
    pub sections: Vec<AdminCategorySection>,
    pub total_stories: usize,
}

impl AdminTemplate {
    fn new(admin: CurrentAdmin, document: &Document, form: StoryForm, flash: Option<Flash>) -> Self {
        let category_options = document
            .categories
            .iter()
            .map(|name| CategoryOption {
                name: name.clone(),
                selected: *name == form.category,
            })
            .collect();

        let sections = document
            .categories
            .iter()
            .filter_map(|name| {
                let stories = document.stories_in(name);
                (!stories.is_empty()).then(|| AdminCategorySection {
                    name: name.clone(),
                    stories: stories.iter().map(|s| admin_row(name, s)).collect(),
                })
            })
            .collect();

        Self {
            admin,
            flash,
            flash_dismiss_ms: FLASH_DISMISS_MS,
            form,
            category_options,
            sections,
            total_stories: document.story_count(),
        }
    }
}

fn admin_row(category: &str, story: &Story) -> AdminStoryRow {
    let category_enc = urlencoding::encode(category);
    let id_enc = urlencoding::encode(story.id.as_str());
    AdminStoryRow {
        title: story.title.clone(),
        excerpt: story.excerpt().to_string(),
        edit_href: format!("/admin?edit_category={category_enc}&edit_id={id_enc}"),
        delete_href: format!("/admin/stories/{category_enc}/{id_enc}/delete"),
    }
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/delete.html")]
pub struct DeleteTemplate {
    pub title: String,
    pub action: String,
}

/// Query selecting a story to edit.
#[derive(Debug, Default, Deserialize)]
pub struct EditQuery {
    pub edit_category: Option<String>,
    pub edit_id: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn load_controller(
    state: &AppState,
) -> Result<AdminController<LocalContentApi>, EditorError> {
    AdminController::load(state.content_api()).await
}

/// Panel shown when the content file cannot be read.
fn load_failed_page(admin: CurrentAdmin, form: StoryForm) -> Response {
    let page = AdminTemplate::new(
        admin,
        &Document::default(),
        form,
        Some(Flash::error(LOAD_FAILED_FLASH)),
    );
    (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
}

/// Show the panel: story form, story list, and any pending flash.
///
/// GET /admin
#[instrument(skip(state, session, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    session: Session,
    Query(query): Query<EditQuery>,
) -> Result<Response, AppError> {
    let mut flash = take_flash(&session).await?;

    let editor = match load_controller(&state).await {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!(error = %e, "Admin panel could not load stories");
            return Ok(load_failed_page(admin, StoryForm::default()));
        }
    };
    let document = editor.document();

    let form = match (&query.edit_category, &query.edit_id) {
        (Some(category), Some(id)) => {
            if let Some(story) = document.find_story(category, id) {
                StoryForm::editing(category, story)
            } else {
                flash = Some(Flash::error(STORY_NOT_FOUND_MESSAGE));
                StoryForm::default()
            }
        }
        _ => StoryForm::default(),
    };

    Ok(AdminTemplate::new(admin, document, form, flash).into_response())
}

/// Create or update a story.
///
/// Success redirects back to the panel with a flash. Any failure re-renders
/// the form with the submitted values kept.
///
/// POST /admin/stories
#[instrument(skip(state, session, admin, form))]
pub async fn save(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    session: Session,
    Form(form): Form<StoryForm>,
) -> Result<Response, AppError> {
    let mut editor = match load_controller(&state).await {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!(error = %e, "Could not load stories before save");
            return Ok(load_failed_page(admin, form));
        }
    };

    let editing = form.editing_story();
    match editor.save_story(form.draft(), editing.as_ref()).await {
        Ok((_, outcome)) => {
            set_flash(&session, Flash::success(outcome.message())).await?;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => {
            let (status, message) = match &e {
                EditorError::Validation(v) => (StatusCode::BAD_REQUEST, v.to_string()),
                EditorError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, STORY_NOT_FOUND_MESSAGE.to_string())
                }
                EditorError::Load(_) | EditorError::Persistence(_) => {
                    tracing::error!(error = %e, "Story save failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED_FLASH.to_string())
                }
            };
            let page = AdminTemplate::new(admin, editor.document(), form, Some(Flash::error(message)));
            Ok((status, page).into_response())
        }
    }
}

/// Ask for confirmation before deleting.
///
/// GET /admin/stories/{category}/{id}/delete
#[instrument(skip(state, session, _admin))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path((category, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let document = state.store().fetch_document().await?;

    let Some(story) = document.find_story(&category, &id) else {
        set_flash(&session, Flash::error(STORY_NOT_FOUND_MESSAGE)).await?;
        return Ok(Redirect::to("/admin").into_response());
    };

    Ok(DeleteTemplate {
        title: story.title.clone(),
        action: format!(
            "/admin/stories/{}/{}/delete",
            urlencoding::encode(&category),
            urlencoding::encode(&id)
        ),
    }
    .into_response())
}

/// Delete a story from one category.
///
/// Deleting a story that is already gone still succeeds.
///
/// POST /admin/stories/{category}/{id}/delete
#[instrument(skip(state, session, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path((category, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let result = match load_controller(&state).await {
        Ok(mut editor) => editor.delete_story(&id, &category).await.map(|_| ()),
        Err(e) => Err(e),
    };

    let flash = match result {
        Ok(()) => Flash::success(DELETED_FLASH),
        Err(e) => {
            tracing::error!(error = %e, "Story delete failed");
            Flash::error(DELETE_FAILED_FLASH)
        }
    };
    set_flash(&session, flash).await?;

    Ok(Redirect::to("/admin").into_response())
}

/// Download the whole document as `stories.json`.
///
/// GET /admin/backup
#[instrument(skip(state, _admin))]
pub async fn backup(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Response, AppError> {
    let document = state.store().fetch_document().await?;
    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::Internal(format!("Failed to serialize backup: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"stories.json\"",
            ),
        ],
        json,
    )
        .into_response())
}
