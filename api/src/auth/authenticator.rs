//! Request authentication.
//!
//! The update workflow never inspects sessions itself: it asks the
//! [`Authenticator`] held in `AppState`. Production uses [`JwtAuthenticator`];
//! tests can plug in anything that implements the trait.

use crate::auth::claims::{Claims, UserIdentity};
use async_trait::async_trait;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use db::models::user::Model as UserModel;
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use sea_orm::DatabaseConnection;
use util::config;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated(UserIdentity),
    Unauthenticated,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, parts: &Parts) -> AuthOutcome;
}

/// Reads the session token from the session cookie, falling back to an
/// `Authorization: Bearer` header.
pub fn session_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(&config::session_cookie_name()) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .map(|Authorization(bearer)| bearer.token().to_string())
}

/// Verifies signature and expiry. Does not touch the database.
pub fn decode_session(token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .ok()
    .map(|data| data.claims)
}

/// Authenticates HS256 session tokens against the `users` table.
///
/// The user must still exist and be active; the staff flag is read from the
/// database rather than the token so revocations apply immediately.
pub struct JwtAuthenticator {
    db: DatabaseConnection,
}

impl JwtAuthenticator {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(&self, parts: &Parts) -> AuthOutcome {
        let Some(claims) = session_token(parts).as_deref().and_then(decode_session) else {
            return AuthOutcome::Unauthenticated;
        };

        match UserModel::get_by_id(&self.db, claims.sub).await {
            Ok(Some(user)) if user.is_active => AuthOutcome::Authenticated(UserIdentity {
                id: user.id,
                username: user.username,
                is_staff: user.is_staff,
            }),
            Ok(_) => AuthOutcome::Unauthenticated,
            Err(e) => {
                tracing::warn!(error = %e, user_id = claims.sub, "Session lookup failed");
                AuthOutcome::Unauthenticated
            }
        }
    }
}
