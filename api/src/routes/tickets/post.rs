use crate::auth::UserIdentity;
use crate::response::{found, html};
use crate::routes::common::{not_found, server_error};
use crate::routes::tickets::extract::SubmissionForm;
use crate::state::AppState;
use crate::views::ticket_form;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use services::ticket_update::{UpdateOutcome, submit};

/// POST /update/{ticket_id}
///
/// ### Responses
/// - `302 Found` → `/tickets/{ticket_id}` once the update is stored
/// - `200 OK` → the form again, with "There are errors in the form", the
///   per-field messages and the submitted values
/// - `404 Not Found` → unknown ticket
/// - `500 Internal Server Error` → database or storage failure
pub async fn update_ticket(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(ticket_id): Path<i64>,
    SubmissionForm(submission): SubmissionForm,
) -> Response {
    match submit(
        app_state.db(),
        app_state.storage_root(),
        ticket_id,
        Some(user.id),
        &submission,
    )
    .await
    {
        Ok(Some(UpdateOutcome::Persisted { ticket, .. })) => {
            found(format!("/tickets/{}", ticket.id))
        }
        Ok(Some(UpdateOutcome::Invalid(form))) => {
            html(StatusCode::OK, ticket_form::render(&form))
        }
        Ok(None) => not_found(),
        Err(e) => server_error("Failed to update ticket", &e),
    }
}
