use async_trait::async_trait;
use db::seeders::default_users;
use sea_orm::{DatabaseConnection, DbErr};

use crate::seed::Seeder;

/// Creates the built-in accounts that are missing.
pub struct DefaultUserSeeder;

#[async_trait]
impl Seeder for DefaultUserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        default_users::ensure_default_users(db).await
    }
}

/// Puts the built-in accounts back on their configured passwords.
pub struct DefaultPasswordReset;

#[async_trait]
impl Seeder for DefaultPasswordReset {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        default_users::reset_default_passwords(db).await
    }
}
