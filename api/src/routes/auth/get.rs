use crate::response::html;
use crate::routes::common::safe_next;
use crate::views::login;
use axum::{extract::Query, http::StatusCode, response::Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// GET /login?next=...
pub async fn login_page(Query(query): Query<LoginQuery>) -> Response {
    let next = safe_next(query.next.as_deref());
    html(StatusCode::OK, login::render(&next, "", None))
}
