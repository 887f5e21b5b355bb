use crate::auth::authenticator::AuthOutcome;
use crate::routes::common::login_redirect;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

/// Staff-only guard.
///
/// Anonymous and non-staff requests are sent to the login page with the
/// original path in `next`. On success the [`UserIdentity`] is inserted into
/// the request extensions.
///
/// [`UserIdentity`]: crate::auth::UserIdentity
pub async fn require_staff(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();

    match app_state.authenticator().authenticate(&parts).await {
        AuthOutcome::Authenticated(user) if user.is_staff => {
            let mut req = Request::from_parts(parts, body);
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        AuthOutcome::Authenticated(user) => {
            tracing::info!(user = user.id, path = %parts.uri.path(), "Non-staff user redirected to login");
            login_redirect(&parts.uri)
        }
        AuthOutcome::Unauthenticated => login_redirect(&parts.uri),
    }
}
