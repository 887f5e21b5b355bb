//! Response builders.
//!
//! Pages are returned as `(StatusCode, Html<String>)`; the only JSON surface is
//! the health check, which uses the [`ApiResponse`] envelope:
//! ```json
//! { "success": true, "data": "OK", "message": "Health check passed" }
//! ```

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

/// Standard JSON envelope.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// `302 Found` with a `Location` header.
///
/// `axum::response::Redirect` only offers 303/307/308.
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

pub fn html(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}
