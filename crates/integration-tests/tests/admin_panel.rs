//! Integration tests for the admin panel.
//!
//! Each test starts a server on an ephemeral port and drives it with a
//! cookie-keeping client, so login state flows through the real session
//! cookie.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::{Response, StatusCode};
use serde_json::{Value, json};
use tales_integration_tests::{
    ADMIN_PASSWORD, ADMIN_USERNAME, TestContent, TestServer, sample_document,
};

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
}

async fn logged_in_server(document: &Value) -> TestServer {
    let server = TestServer::start(TestContent::with(document)).await;
    server.login().await;
    server
}

async fn admin_page(server: &TestServer) -> String {
    let response = server.client.get(server.url("/admin")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.text().await.unwrap()
}

async fn submit_story(server: &TestServer, fields: &[(&str, &str)]) -> Response {
    server
        .client
        .post(server.url("/admin/stories"))
        .form(fields)
        .send()
        .await
        .unwrap()
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_admin_requires_login() {
    let server = TestServer::start(TestContent::with(&sample_document())).await;

    for path in ["/admin", "/admin/backup", "/admin/stories/Horror/horror-the-visitor/delete"] {
        let response = server.client.get(server.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/admin/login"), "{path}");
    }
}

#[tokio::test]
async fn test_unauthenticated_save_changes_nothing() {
    let server = TestServer::start(TestContent::with(&sample_document())).await;
    let before = server.content.bytes();

    let response = submit_story(
        &server,
        &[
            ("title", "Intruder"),
            ("category", "Horror"),
            ("image", "/x.png"),
            ("content", "x"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(server.content.bytes(), before);
}

#[tokio::test]
async fn test_login_page_renders() {
    let server = TestServer::start(TestContent::with(&sample_document())).await;

    let response = server.client.get(server.url("/admin/login")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Admin Login"));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let server = TestServer::start(TestContent::with(&sample_document())).await;

    let response = server
        .client
        .post(server.url("/admin/login"))
        .form(&[("username", ADMIN_USERNAME), ("password", "wrong")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let html = response.text().await.unwrap();
    assert!(html.contains("Invalid username or password"));
    assert!(html.contains(ADMIN_USERNAME));

    let response = server.client.get(server.url("/admin")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_wrong_username_is_rejected() {
    let server = TestServer::start(TestContent::with(&sample_document())).await;

    let response = server
        .client
        .post(server.url("/admin/login"))
        .form(&[("username", "someone"), ("password", ADMIN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_then_logout() {
    let server = logged_in_server(&sample_document()).await;

    let html = admin_page(&server).await;
    assert!(html.contains("Admin Panel"));
    assert!(html.contains("Total stories: 1"));
    assert!(html.contains("The Visitor"));

    // Logged-in visits to the login page bounce to the panel.
    let response = server.client.get(server.url("/admin/login")).send().await.unwrap();
    assert_eq!(location(&response), Some("/admin"));

    let response = server.client.post(server.url("/admin/logout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin/login"));

    let response = server.client.get(server.url("/admin")).send().await.unwrap();
    assert_eq!(location(&response), Some("/admin/login"));
}

// =============================================================================
// Story Editing
// =============================================================================

#[tokio::test]
async fn test_add_story_saves_file_and_flashes_once() {
    let server = logged_in_server(&sample_document()).await;

    let response = submit_story(
        &server,
        &[
            ("title", "My Tale"),
            ("category", "Horror"),
            ("image", "https://images.example.com/tale.jpg"),
            ("content", "It was late."),
            ("editing_id", ""),
            ("original_category", ""),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin"));

    let stored = server.content.json();
    let horror = stored["stories"]["Horror"].as_array().unwrap();
    assert_eq!(horror.len(), 2);
    assert_eq!(horror[1]["id"], "horror-my-tale");
    assert_eq!(horror[1]["title"], "My Tale");
    assert_eq!(horror[1]["category"], "Horror");

    let html = admin_page(&server).await;
    assert!(html.contains("Story added successfully! File saved automatically."));
    assert!(html.contains("Total stories: 2"));

    let html = admin_page(&server).await;
    assert!(!html.contains("Story added successfully!"));
}

#[tokio::test]
async fn test_duplicate_titles_get_numbered_ids() {
    let server = logged_in_server(&sample_document()).await;
    let fields = [
        ("title", "The Visitor"),
        ("category", "Horror"),
        ("image", "/images/again.png"),
        ("content", "Again."),
    ];

    submit_story(&server, &fields).await;
    submit_story(&server, &fields).await;

    let stored = server.content.json();
    let ids: Vec<&str> = stored["stories"]["Horror"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["horror-the-visitor", "horror-the-visitor-1", "horror-the-visitor-2"]
    );
}

#[tokio::test]
async fn test_invalid_story_is_rerendered_without_saving() {
    let server = logged_in_server(&sample_document()).await;
    let before = server.content.bytes();

    let response = submit_story(
        &server,
        &[
            ("title", "   "),
            ("category", "Horror"),
            ("image", "/images/x.png"),
            ("content", "Kept content"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = response.text().await.unwrap();
    assert!(html.contains("title is required"));
    assert!(html.contains("Kept content"));
    assert_eq!(server.content.bytes(), before);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let server = logged_in_server(&sample_document()).await;
    let before = server.content.bytes();

    let response = submit_story(
        &server,
        &[
            ("title", "Lost"),
            ("category", "Western"),
            ("image", "/images/x.png"),
            ("content", "x"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(server.content.bytes(), before);
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let server = logged_in_server(&sample_document()).await;

    let response = server
        .client
        .get(server.url("/admin?edit_category=Horror&edit_id=horror-the-visitor"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("Edit Story"));
    assert!(html.contains("value=\"horror-the-visitor\""));
    assert!(html.contains("Nobody was there."));
}

#[tokio::test]
async fn test_edit_keeps_id_and_replaces_in_place() {
    let server = logged_in_server(&sample_document()).await;

    let response = submit_story(
        &server,
        &[
            ("title", "The Visitor Returns"),
            ("category", "Horror"),
            ("image", "/images/returns.png"),
            ("content", "Three knocks this time."),
            ("editing_id", "horror-the-visitor"),
            ("original_category", "Horror"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let stored = server.content.json();
    let horror = stored["stories"]["Horror"].as_array().unwrap();
    assert_eq!(horror.len(), 1);
    assert_eq!(horror[0]["id"], "horror-the-visitor");
    assert_eq!(horror[0]["title"], "The Visitor Returns");

    let html = admin_page(&server).await;
    assert!(html.contains("Story updated successfully! File saved automatically."));
}

#[tokio::test]
async fn test_edit_with_new_category_moves_story() {
    let server = logged_in_server(&sample_document()).await;

    submit_story(
        &server,
        &[
            ("title", "The Visitor"),
            ("category", "Sci Fi"),
            ("image", "/images/visitor.png"),
            ("content", "From orbit."),
            ("editing_id", "horror-the-visitor"),
            ("original_category", "Horror"),
        ],
    )
    .await;

    let stored = server.content.json();
    assert_eq!(stored["stories"]["Horror"], json!([]));
    assert_eq!(stored["stories"]["Sci Fi"][0]["id"], "horror-the-visitor");
    assert_eq!(stored["stories"]["Sci Fi"][0]["category"], "Sci Fi");
}

#[tokio::test]
async fn test_editing_missing_story_is_not_found() {
    let server = logged_in_server(&sample_document()).await;
    let before = server.content.bytes();

    let response = submit_story(
        &server,
        &[
            ("title", "Ghost"),
            ("category", "Horror"),
            ("image", "/images/ghost.png"),
            ("content", "Boo."),
            ("editing_id", "horror-ghost"),
            ("original_category", "Horror"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Story not found."));
    assert_eq!(server.content.bytes(), before);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_asks_then_removes() {
    let server = logged_in_server(&sample_document()).await;
    let path = "/admin/stories/Horror/horror-the-visitor/delete";

    let response = server.client.get(server.url(path)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Are you sure you want to delete"));
    assert!(html.contains("The Visitor"));

    let response = server.client.post(server.url(path)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin"));

    let stored = server.content.json();
    assert_eq!(stored["stories"]["Horror"], json!([]));
    assert_eq!(stored["categories"], json!(["Horror", "Sci Fi"]));

    let html = admin_page(&server).await;
    assert!(html.contains("Story deleted successfully! File saved automatically."));
    assert!(html.contains("Total stories: 0"));
}

#[tokio::test]
async fn test_delete_missing_story_still_succeeds() {
    let server = logged_in_server(&sample_document()).await;

    let response = server
        .client
        .post(server.url("/admin/stories/Horror/horror-nobody/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(server.content.json()["stories"]["Horror"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_removes_duplicate_ids() {
    let mut document = sample_document();
    let copy = document["stories"]["Horror"][0].clone();
    document["stories"]["Horror"].as_array_mut().unwrap().push(copy);
    let server = logged_in_server(&document).await;

    let response = server
        .client
        .post(server.url("/admin/stories/Horror/horror-the-visitor/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(server.content.json()["stories"]["Horror"], json!([]));
}

// =============================================================================
// Unknown Fields
// =============================================================================

#[tokio::test]
async fn test_admin_save_keeps_fields_posted_through_api() {
    let server = logged_in_server(&sample_document()).await;
    let mut document = sample_document();
    document["stories"]["Horror"][0]["author"] = json!("Jo");
    document["featured"] = json!(["horror-the-visitor"]);

    let response = server
        .client
        .post(server.url("/api/stories"))
        .json(&document)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = submit_story(
        &server,
        &[
            ("title", "Launch"),
            ("category", "Sci Fi"),
            ("image", "/images/launch.png"),
            ("content", "Lift off."),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let stored: Value = server
        .client
        .get(server.url("/api/stories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored["stories"]["Horror"][0]["author"], "Jo");
    assert_eq!(stored["featured"], json!(["horror-the-visitor"]));
    assert_eq!(stored["stories"]["Sci Fi"][0]["id"], "sci-fi-launch");
    assert!(stored["stories"]["Sci Fi"][0].get("author").is_none());
}

// =============================================================================
// Backup
// =============================================================================

#[tokio::test]
async fn test_backup_downloads_current_document() {
    let server = logged_in_server(&sample_document()).await;

    let response = server.client.get(server.url("/admin/backup")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("stories.json"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, server.content.json());
}
