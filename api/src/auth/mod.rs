pub mod authenticator;
pub mod claims;
pub mod guards;
pub mod middleware;

pub use authenticator::{AuthOutcome, Authenticator, JwtAuthenticator};
pub use claims::{Claims, UserIdentity};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config;

/// Generates a session token and its expiry timestamp for a given user.
pub fn generate_session_token(
    user_id: i64,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::minutes(config::jwt_duration_minutes() as i64);
    let exp_timestamp = expiry.timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: exp_timestamp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}
