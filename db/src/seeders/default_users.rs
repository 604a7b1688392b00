//! The two built-in accounts every installation starts with.

use sea_orm::{ConnectionTrait, DbErr};
use tracing::info;
use util::config;

use crate::models::user::{Model as User, Role};

pub const ADMIN_USERNAME: &str = "admin";
pub const STUDENT_USERNAME: &str = "student";

fn defaults() -> [(&'static str, String, Role); 2] {
    [
        (ADMIN_USERNAME, config::default_admin_password(), Role::Admin),
        (STUDENT_USERNAME, config::default_student_password(), Role::Student),
    ]
}

/// Creates `admin` and `student` with the configured default passwords if
/// they do not exist. Existing accounts are left untouched.
pub async fn ensure_default_users<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    for (username, password, role) in defaults() {
        if User::find_by_username(db, username).await?.is_none() {
            User::create(db, username, &password, role).await?;
            info!(username, %role, "created default user");
        }
    }
    Ok(())
}

/// Puts both default accounts back on their configured passwords,
/// creating them when missing.
pub async fn reset_default_passwords<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    for (username, password, role) in defaults() {
        let hash = User::hash_password(&password)?;
        if !User::update_password_hash(db, username, hash).await? {
            User::create(db, username, &password, role).await?;
        }
        info!(username, "reset default user password");
    }
    Ok(())
}
