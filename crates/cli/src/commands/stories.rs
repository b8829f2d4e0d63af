//! Story management against a running server.
//!
//! Changes go through the same admin controller the web panel uses, so ids,
//! validation and whole-document saves behave identically.

use tales_core::{Document, StoryDraft};
use tales_server::services::{AdminController, HttpContentApi};
use tracing::info;

use super::CommandError;

async fn controller(api_url: &str) -> Result<AdminController<HttpContentApi>, CommandError> {
    let api = HttpContentApi::new(api_url)?;
    Ok(AdminController::load(api).await?)
}

/// Lines describing the stories in `category`, or in every category.
fn listing(document: &Document, category: Option<&str>) -> Vec<String> {
    let categories: Vec<&str> = match category {
        Some(category) => vec![category],
        None => document.categories.iter().map(String::as_str).collect(),
    };

    let mut lines = Vec::new();
    for name in categories {
        let stories = document.stories_in(name);
        lines.push(format!("{name} ({})", stories.len()));
        for story in stories {
            lines.push(format!("  {}  {}", story.id, story.title));
        }
    }
    lines
}

/// Print the stories on the server.
///
/// # Errors
///
/// Returns an error if the document cannot be fetched.
pub async fn list(api_url: &str, category: Option<&str>) -> Result<(), CommandError> {
    let editor = controller(api_url).await?;
    for line in listing(editor.document(), category) {
        #[allow(clippy::print_stdout)]
        {
            println!("{line}");
        }
    }
    Ok(())
}

/// Add a story and print its generated id.
///
/// # Errors
///
/// Returns `CommandError::Editor` if the draft is invalid or the save fails.
pub async fn add(
    api_url: &str,
    title: String,
    category: String,
    image: String,
    content: String,
) -> Result<(), CommandError> {
    let mut editor = controller(api_url).await?;
    let draft = StoryDraft {
        title,
        category,
        image,
        content,
    };

    let (story, outcome) = editor.save_story(draft, None).await?;
    info!(id = %story.id, category = %story.category, "{}", outcome.message());

    #[allow(clippy::print_stdout)]
    {
        println!("{}", story.id);
    }
    Ok(())
}

/// Delete a story from one category. Succeeds if it is already gone.
///
/// # Errors
///
/// Returns `CommandError::Editor` if the save fails.
pub async fn delete(api_url: &str, category: &str, id: &str) -> Result<(), CommandError> {
    let mut editor = controller(api_url).await?;
    let removed = editor.delete_story(id, category).await?;
    if removed.is_empty() {
        info!(%id, %category, "Story was not present; nothing to delete");
    } else {
        info!(%id, %category, count = removed.len(), "Story deleted");
    }
    Ok(())
}
