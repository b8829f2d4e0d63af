//! Integration tests for Tales.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tales-integration-tests
//! ```
//!
//! Every test gets its own content file in a temporary directory. Router
//! tests drive the app in-process with `tower::ServiceExt::oneshot`; browser
//! style tests start a real server on an ephemeral port and talk to it with a
//! cookie-keeping `reqwest` client.
//!
//! # Test Categories
//!
//! - `content_api` - `GET`/`POST /api/stories`
//! - `public_site` - Home, category and reader pages
//! - `admin_panel` - Login, story editing and backup
//! - `http_content_api` - The CLI's HTTP client against a live server

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use tales_server::config::{AdminCredentials, SiteConfig};
use tales_server::state::AppState;

/// Admin login used by every test server.
pub const ADMIN_USERNAME: &str = "curator";
/// Admin password used by every test server.
pub const ADMIN_PASSWORD: &str = "Zq8!vR2#kLm5pW";

/// A content file in its own temporary directory.
pub struct TestContent {
    dir: TempDir,
    path: PathBuf,
}

impl TestContent {
    /// Directory with no content file yet.
    #[must_use]
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("stories.json");
        Self { dir, path }
    }

    /// Directory holding `document` as its content file.
    #[must_use]
    pub fn with(document: &Value) -> Self {
        let content = Self::empty();
        content.write(document);
        content
    }

    /// Overwrite the content file.
    pub fn write(&self, document: &Value) {
        let text = serde_json::to_string_pretty(document).expect("Failed to serialize fixture");
        std::fs::write(&self.path, text).expect("Failed to write fixture");
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Raw bytes of the content file.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("Failed to read content file")
    }

    /// Parsed content file.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes()).expect("Content file is not JSON")
    }

    /// App serving this content file.
    #[must_use]
    pub fn app(&self) -> Router {
        app_for(&self.path)
    }
}

/// Configuration for a local test server over `data_path`.
#[must_use]
pub fn test_config(data_path: &Path) -> SiteConfig {
    SiteConfig::local(
        data_path,
        AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
        },
    )
}

/// The full application over `data_path`.
#[must_use]
pub fn app_for(data_path: &Path) -> Router {
    tales_server::app(AppState::new(test_config(data_path)))
}

/// Two categories, one story in the first.
#[must_use]
pub fn sample_document() -> Value {
    json!({
        "categories": ["Horror", "Sci Fi"],
        "stories": {
            "Horror": [{
                "id": "horror-the-visitor",
                "title": "The Visitor",
                "category": "Horror",
                "image": "https://images.example.com/visitor.jpg",
                "content": "Someone knocked twice.\n\nNobody was there."
            }],
            "Sci Fi": []
        }
    })
}

/// `n` space-separated words.
#[must_use]
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

/// Send one request through `app`.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("Router is infallible")
}

/// `GET uri`.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    send(app, request).await
}

/// `POST uri` with a raw JSON body.
pub async fn post_json(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .expect("Failed to build request");
    send(app, request).await
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).expect("Body is not JSON")
}

/// Assert the status and return the body text.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    body_text(response).await
}

/// A real server on an ephemeral port.
pub struct TestServer {
    pub content: TestContent,
    pub base_url: String,
    /// Cookie-keeping client that does not follow redirects.
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve `content` until the test's runtime shuts down.
    pub async fn start(content: TestContent) -> Self {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let app = content.app();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            content,
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Log in with the test credentials.
    pub async fn login(&self) {
        let response = self
            .client
            .post(self.url("/admin/login"))
            .form(&[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
            .send()
            .await
            .expect("Login request failed");
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok()),
            Some("/admin")
        );
    }
}
