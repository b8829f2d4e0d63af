//! Admin login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{LOGIN_PATH, OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    /// Username to keep in the field after a failed attempt.
    pub username: String,
}

/// Display the login page, or go straight to the panel when logged in.
///
/// GET /admin/login
pub async fn login_page(OptionalAdminAuth(auth): OptionalAdminAuth) -> Response {
    if auth.is_authenticated() {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate {
        error: None,
        username: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
///
/// Failure re-renders the form with the error and status 401.
///
/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth().authenticate(&form.username, &form.password) {
        Ok(admin) => {
            set_current_admin(&session, &admin).await?;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(e) => Ok((
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                error: Some(e.to_string()),
                username: form.username,
            },
        )
            .into_response()),
    }
}

/// Logout and clear session.
///
/// POST /admin/logout
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }

    Redirect::to(LOGIN_PATH)
}
