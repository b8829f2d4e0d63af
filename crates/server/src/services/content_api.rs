//! Access to the content document, in-process or over HTTP.
//!
//! [`ContentApi`] is the seam between the admin controller and wherever the
//! document actually lives. The server's own admin pages use
//! [`LocalContentApi`] over the file store; the CLI talks to a running server
//! through [`HttpContentApi`].

use std::future::Future;

use reqwest::StatusCode;
use serde::Deserialize;
use tales_core::Document;
use thiserror::Error;
use url::Url;

use crate::store::{ContentStore, StoreError};

/// Path of the content endpoint, relative to the server's base URL.
pub const STORIES_PATH: &str = "api/stories";

/// Errors from fetching or replacing the document.
#[derive(Debug, Error)]
pub enum ContentApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("request to {url} failed: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with an error status; `message` is its `error` field.
    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },

    #[error("invalid response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Load and overwrite the whole content document.
pub trait ContentApi: Send + Sync {
    /// Fetch the current document.
    fn fetch_document(&self) -> impl Future<Output = Result<Document, ContentApiError>> + Send;

    /// Replace the stored document with `document` in full.
    fn replace_document(
        &self,
        document: &Document,
    ) -> impl Future<Output = Result<(), ContentApiError>> + Send;
}

/// In-process access through the file store.
#[derive(Debug, Clone)]
pub struct LocalContentApi {
    store: ContentStore,
}

impl LocalContentApi {
    #[must_use]
    pub const fn new(store: ContentStore) -> Self {
        Self { store }
    }
}

impl ContentApi for LocalContentApi {
    async fn fetch_document(&self) -> Result<Document, ContentApiError> {
        Ok(self.store.fetch_document().await?)
    }

    async fn replace_document(&self, document: &Document) -> Result<(), ContentApiError> {
        Ok(self.store.replace_document(document).await?)
    }
}

/// Error body returned by the content endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a remote server's `/api/stories` endpoint.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    client: reqwest::Client,
    stories_url: Url,
}

impl HttpContentApi {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ContentApiError::InvalidUrl` if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, ContentApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            stories_url: base.join(STORIES_PATH)?,
        })
    }

    /// Full URL of the content endpoint.
    #[must_use]
    pub const fn stories_url(&self) -> &Url {
        &self.stories_url
    }

    fn request_error(&self, source: reqwest::Error) -> ContentApiError {
        ContentApiError::Request {
            url: self.stories_url.clone(),
            source,
        }
    }

    /// Turn a non-success response into `ContentApiError::Api`, keeping the
    /// server's own message when the body carries one.
    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ContentApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Err(ContentApiError::Api { status, message })
    }
}

impl ContentApi for HttpContentApi {
    async fn fetch_document(&self) -> Result<Document, ContentApiError> {
        let response = self
            .client
            .get(self.stories_url.clone())
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        self.check_status(response)
            .await?
            .json::<Document>()
            .await
            .map_err(|source| ContentApiError::Decode {
                url: self.stories_url.clone(),
                source,
            })
    }

    async fn replace_document(&self, document: &Document) -> Result<(), ContentApiError> {
        let response = self
            .client
            .post(self.stories_url.clone())
            .json(document)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        self.check_status(response).await?;
        Ok(())
    }
}
