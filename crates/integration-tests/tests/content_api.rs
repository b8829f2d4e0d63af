//! Integration tests for the content API.
//!
//! `GET /api/stories` returns the whole document and `POST /api/stories`
//! replaces it. Both are open to any origin.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tales_integration_tests::{TestContent, body_json, get, post_json, sample_document, send};

// =============================================================================
// GET /api/stories
// =============================================================================

#[tokio::test]
async fn test_get_returns_whole_document() {
    let content = TestContent::with(&sample_document());

    let response = get(content.app(), "/api/stories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["categories"], json!(["Horror", "Sci Fi"]));
    assert_eq!(body["stories"]["Horror"][0]["id"], "horror-the-visitor");
    assert_eq!(body["stories"]["Sci Fi"], json!([]));
}

#[tokio::test]
async fn test_get_derives_categories_from_images() {
    let content = TestContent::with(&json!({
        "categoryImages": {
            "Romance": "/images/romance.png",
            "Fable": "/images/fable.png"
        },
        "stories": {}
    }));

    let body = body_json(get(content.app(), "/api/stories").await).await;
    assert_eq!(body["categories"], json!(["Romance", "Fable"]));
    assert_eq!(body["categoryImages"]["Fable"], "/images/fable.png");
}

#[tokio::test]
async fn test_get_returns_file_verbatim() {
    let document = json!({
        "categories": ["Zeta", "Alpha"],
        "stories": {
            "Zeta": [{
                "id": "zeta-one",
                "title": "One",
                "category": "Zeta",
                "image": "/one.png",
                "content": "1",
                "author": "Jo"
            }],
            "Alpha": []
        },
        "version": 3
    });
    let content = TestContent::with(&document);

    let text = tales_integration_tests::body_text(get(content.app(), "/api/stories").await).await;
    assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), document);
    assert!(text.find("\"Zeta\":[").unwrap() < text.find("\"Alpha\":[").unwrap());
}

#[tokio::test]
async fn test_get_missing_file_is_read_failure() {
    let content = TestContent::empty();

    let response = get(content.app(), "/api/stories").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Failed to read stories"})
    );
}

#[tokio::test]
async fn test_get_malformed_file_is_read_failure() {
    let content = TestContent::empty();
    std::fs::write(content.path(), "{ not json").unwrap();

    let response = get(content.app(), "/api/stories").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to read stories");
}

// =============================================================================
// POST /api/stories
// =============================================================================

#[tokio::test]
async fn test_post_replaces_document() {
    let content = TestContent::with(&sample_document());
    let replacement = json!({
        "categories": ["Fable"],
        "stories": {
            "Fable": [{
                "id": "fable-the-fox",
                "title": "The Fox",
                "category": "Fable",
                "image": "/images/fox.png",
                "content": "A fox."
            }]
        }
    });

    let response = post_json(content.app(), "/api/stories", replacement.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"success": true, "message": "Stories saved successfully"})
    );

    let stored = body_json(get(content.app(), "/api/stories").await).await;
    assert_eq!(stored["categories"], json!(["Fable"]));
    assert_eq!(stored["stories"]["Fable"][0]["title"], "The Fox");
    assert!(stored["stories"].get("Horror").is_none());
}

#[tokio::test]
async fn test_post_writes_pretty_json() {
    let content = TestContent::with(&sample_document());

    let body = json!({"categories": ["A"], "stories": {"A": []}}).to_string();
    let response = post_json(content.app(), "/api/stories", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = String::from_utf8(content.bytes()).unwrap();
    assert!(text.contains("\n  \"categories\""));
}

#[tokio::test]
async fn test_post_without_categories_is_rejected() {
    let content = TestContent::with(&sample_document());
    let before = content.bytes();

    let response = post_json(content.app(), "/api/stories", r#"{"stories":{}}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Categories and stories are required"})
    );
    assert_eq!(content.bytes(), before);
}

#[tokio::test]
async fn test_post_without_stories_is_rejected() {
    let content = TestContent::with(&sample_document());
    let before = content.bytes();

    let response = post_json(content.app(), "/api/stories", r#"{"categories":["A"]}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Categories and stories are required"
    );
    assert_eq!(content.bytes(), before);
}

#[tokio::test]
async fn test_post_malformed_json_is_rejected() {
    let content = TestContent::with(&sample_document());
    let before = content.bytes();

    let response = post_json(content.app(), "/api/stories", "{ nope").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert_eq!(content.bytes(), before);
}

#[tokio::test]
async fn test_post_creates_missing_file() {
    let content = TestContent::empty();

    let body = json!({"categories": ["A"], "stories": {"A": []}}).to_string();
    let response = post_json(content.app(), "/api/stories", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content.json()["categories"], json!(["A"]));
}

#[tokio::test]
async fn test_post_unwritable_location_is_save_failure() {
    let content = TestContent::empty();
    // A regular file where the data directory should be.
    let blocker = content.dir().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let app = tales_integration_tests::app_for(&blocker.join("stories.json"));

    let body = json!({"categories": ["A"], "stories": {"A": []}}).to_string();
    let response = post_json(app, "/api/stories", body).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Failed to save stories"})
    );
}

// =============================================================================
// Cross-cutting
// =============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let content = TestContent::with(&sample_document());

    let request = Request::builder()
        .uri("/api/stories")
        .header("origin", "https://editor.example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(content.app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let content = TestContent::with(&sample_document());

    let response = get(content.app(), "/api/stories").await;
    let id = response.headers().get("x-request-id").unwrap();
    assert!(!id.is_empty());
}
