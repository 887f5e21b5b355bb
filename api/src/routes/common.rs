use crate::response::{found, html};
use crate::views::errors;
use axum::{
    http::{StatusCode, Uri},
    response::Response,
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use services::ServiceError;

/// `302` to the login page, carrying the requested path and query in `next`.
pub fn login_redirect(uri: &Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    found(format!(
        "/login?next={}",
        utf8_percent_encode(target, NON_ALPHANUMERIC)
    ))
}

/// Accepts only local absolute paths as post-login targets.
pub fn safe_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.contains('\\') => n.to_string(),
        _ => "/".to_string(),
    }
}

pub fn not_found() -> Response {
    html(StatusCode::NOT_FOUND, errors::not_found())
}

/// Logs the failure and renders the generic error page.
pub fn server_error(context: &str, err: &ServiceError) -> Response {
    tracing::error!(error = %err, "{context}");
    html(StatusCode::INTERNAL_SERVER_ERROR, errors::server_error())
}
