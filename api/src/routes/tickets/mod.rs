//! Staff ticket pages. Every route here sits behind `require_staff`.
//!
//! - `GET /` → ticket list
//! - `GET /tickets/{ticket_id}` → ticket detail
//! - `GET /update/{ticket_id}` → update form
//! - `POST /update/{ticket_id}` → apply an update (urlencoded or multipart)

use crate::state::AppState;
use axum::{Router, routing::get};

pub mod extract;
pub mod get;
pub mod post;

pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_tickets))
        .route("/tickets/{ticket_id}", get(get::ticket_detail))
        .route(
            "/update/{ticket_id}",
            get(get::update_form).post(post::update_ticket),
        )
}
