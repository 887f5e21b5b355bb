use crate::auth::generate_session_token;
use crate::response::{found, html};
use crate::routes::common::safe_next;
use crate::state::AppState;
use crate::views::login::{self, INVALID_CREDENTIALS};
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use db::models::user::Model as UserModel;
use serde::Deserialize;
use util::config;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[serde(default)]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,

    pub next: Option<String>,
}

/// POST /login
///
/// On success sets an `HttpOnly` session cookie and redirects (302) to `next`
/// (local paths only, default `/`). Invalid input or credentials re-render the
/// form with status 200.
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> Response {
    let next = safe_next(req.next.as_deref());

    if req.validate().is_err() {
        return html(
            StatusCode::OK,
            login::render(&next, &req.username, Some(INVALID_CREDENTIALS)),
        );
    }

    let user = match UserModel::verify_credentials(app_state.db(), &req.username, &req.password).await
    {
        Ok(Some(user)) => user,
        Ok(_) => {
            tracing::info!(username = %req.username, "Failed login attempt");
            return html(
                StatusCode::OK,
                login::render(&next, &req.username, Some(INVALID_CREDENTIALS)),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Credential lookup failed");
            return html(
                StatusCode::INTERNAL_SERVER_ERROR,
                crate::views::errors::server_error(),
            );
        }
    };

    let (token, expires_at) = match generate_session_token(user.id) {
        Ok(issued) => issued,
        Err(e) => {
            tracing::error!(error = %e, "Session token encoding failed");
            return html(
                StatusCode::INTERNAL_SERVER_ERROR,
                crate::views::errors::server_error(),
            );
        }
    };

    tracing::info!(user = user.id, expires_at = %expires_at, "User logged in");

    let cookie = Cookie::build((config::session_cookie_name(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), found(next)).into_response()
}

/// POST /logout
pub async fn logout(jar: CookieJar) -> Response {
    let cookie = Cookie::build(config::session_cookie_name()).path("/");
    (jar.remove(cookie), found("/login")).into_response()
}
