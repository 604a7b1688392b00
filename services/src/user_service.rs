use db::models::user::Model as User;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::error::AppError;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const CURRENT_PASSWORD_INCORRECT: &str = "❌ Current password is incorrect.";
pub const NEW_PASSWORD_EMPTY: &str = "⚠️ New password cannot be empty.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "⚠️ Passwords do not match.";
pub const PASSWORD_CHANGED: &str = "✅ Password changed successfully.";

pub struct UserService;

impl UserService {
    /// Checks a username/password pair. Surrounding whitespace is ignored on
    /// both.
    pub async fn login<C: ConnectionTrait>(
        db: &C,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        match User::verify_credentials(db, username.trim(), password.trim()).await? {
            Some(user) => {
                info!(username = %user.username, role = %user.role, "user logged in");
                Ok(user)
            }
            None => {
                warn!(username = username.trim(), "failed login attempt");
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
    }

    /// Checks run in order: current password, non-empty new password,
    /// confirmation match.
    pub async fn change_password<C: ConnectionTrait>(
        db: &C,
        username: &str,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<&'static str, AppError> {
        let new_password = new_password.trim();

        if User::verify_credentials(db, username, current_password.trim())
            .await?
            .is_none()
        {
            return Err(AppError::validation(CURRENT_PASSWORD_INCORRECT));
        }
        if new_password.is_empty() {
            return Err(AppError::validation(NEW_PASSWORD_EMPTY));
        }
        if new_password != confirm_password.trim() {
            return Err(AppError::validation(PASSWORDS_DO_NOT_MATCH));
        }

        let hash = User::hash_password(new_password)?;
        if !User::update_password_hash(db, username, hash).await? {
            return Err(AppError::not_found(format!("User '{username}' not found")));
        }

        info!(username, "password changed");
        Ok(PASSWORD_CHANGED)
    }
}
