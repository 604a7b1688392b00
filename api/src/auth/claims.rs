use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub admin: bool,
    pub exp: usize,
}

/// The caller behind a verified token, inserted into request extensions by
/// the guards.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
