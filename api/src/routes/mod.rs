//! HTTP route entry point.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/login`, `/logout` → session entry point (public)
//! - `/`, `/tickets/{id}`, `/update/{id}` → staff ticket pages, behind `require_staff`

use crate::auth::guards::require_staff;
use crate::routes::{auth::auth_routes, health::health_routes, tickets::ticket_routes};
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state};

pub mod auth;
pub mod common;
pub mod health;
pub mod tickets;

/// Builds the complete application router.
///
/// The staff guard is applied as a `route_layer`, so unknown paths still
/// produce a plain 404 instead of a login redirect.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .merge(auth_routes())
        .merge(
            ticket_routes()
                .route_layer(from_fn_with_state(app_state.clone(), require_staff)),
        )
        .with_state(app_state)
}
