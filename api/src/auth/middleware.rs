use crate::auth::authenticator::{decode_session, session_token};
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use headers::{HeaderMapExt, UserAgent};
use std::net::SocketAddr;
use tracing::info;

/// Logs method, path, IP address, user ID (if a valid session is present) and
/// user-agent for each incoming HTTP request. Skips `OPTIONS` preflights.
///
/// ### Usage:
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::auth::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();

    let user_id = session_token(&parts)
        .as_deref()
        .and_then(decode_session)
        .map(|c| c.sub);

    // Absent when the router is driven without a socket, as in tests.
    let ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let user_agent = parts.headers.typed_get::<UserAgent>().map(|ua| ua.to_string());

    info!(
        method = ?parts.method,
        path = %parts.uri.path(),
        ip = %ip.unwrap_or_else(|| "unknown".into()),
        user = user_id.unwrap_or(0),
        user_agent = %user_agent.unwrap_or_else(|| "unknown".into()),
        "Incoming request"
    );

    next.run(Request::from_parts(parts, body)).await
}
