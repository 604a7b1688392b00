pub mod models;
pub mod seeders;
pub mod test_utils;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use util::{config, paths::ensure_parent_dir};

/// Opens the attendance database named by `DATABASE_PATH`.
///
/// A value that already looks like a DSN is used as-is; anything else is
/// treated as a SQLite file path and created on first use.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = database_url(&config::database_path())?;

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);

    Database::connect(opts).await
}

fn database_url(path_or_url: &str) -> Result<String, DbErr> {
    if path_or_url.starts_with("sqlite:") {
        return Ok(path_or_url.to_owned());
    }

    // SQLite won't create intermediate dirs.
    ensure_parent_dir(path_or_url)
        .map_err(|e| DbErr::Custom(format!("cannot create database directory: {e}")))?;

    Ok(format!("sqlite://{path_or_url}?mode=rwc"))
}
