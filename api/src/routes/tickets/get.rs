use crate::response::html;
use crate::routes::common::{not_found, server_error};
use crate::state::AppState;
use crate::views::{ticket_detail, ticket_form, ticket_list};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::ticket::Model as TicketModel;
use services::{ServiceError, ticket_detail::load_detail, ticket_update::load_form};

/// GET /
pub async fn list_tickets(State(app_state): State<AppState>) -> Response {
    match TicketModel::find_all(app_state.db()).await {
        Ok(tickets) => html(StatusCode::OK, ticket_list::render(&tickets)),
        Err(e) => server_error("Failed to list tickets", &ServiceError::from(e)),
    }
}

/// GET /tickets/{ticket_id}
pub async fn ticket_detail(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Response {
    match load_detail(app_state.db(), ticket_id).await {
        Ok(Some(detail)) => html(StatusCode::OK, ticket_detail::render(&detail)),
        Ok(None) => not_found(),
        Err(e) => server_error("Failed to load ticket", &e),
    }
}

/// GET /update/{ticket_id}
///
/// Renders the combined standard and custom field form, pre-filled from the
/// stored ticket.
pub async fn update_form(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Response {
    match load_form(app_state.db(), ticket_id).await {
        Ok(Some(form)) => html(StatusCode::OK, ticket_form::render(&form)),
        Ok(None) => not_found(),
        Err(e) => server_error("Failed to load ticket form", &e),
    }
}
