//! Login and logout.
//!
//! - `GET /login` → login form
//! - `POST /login` → verify credentials, set the session cookie, redirect to `next`
//! - `POST /logout` → clear the session cookie, redirect to `/login`

use crate::state::AppState;
use axum::{Router, routing::{get, post}};

pub mod get;
pub mod post;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(get::login_page).post(post::login))
        .route("/logout", post(post::logout))
}
