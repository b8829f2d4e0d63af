//! Correlation ids for story site requests.
//!
//! A save from the admin panel or the CLI logs several events (validation,
//! the content file write, reference warnings). They share the
//! `request_id` field on the `http_request` span, so one save can be traced
//! end to end. The same id is tagged on any Sentry event and returned in the
//! `x-request-id` response header, so a failed save reported by an operator
//! can be matched to the server log.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Take the caller's `x-request-id` or mint a UUID v4, then record it on the
/// request span, the Sentry scope and the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
