use serde::{Deserialize, Serialize};

/// Session token payload. Only identifies the user; roles are looked up on
/// every request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
}

/// The acting user, as confirmed by an [`Authenticator`](super::Authenticator).
///
/// The staff guard inserts it into request extensions; handlers read it with
/// `Extension<UserIdentity>`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub is_staff: bool,
}
