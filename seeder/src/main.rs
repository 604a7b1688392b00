use std::env;
use std::process::ExitCode;

use migration::Migrator;
use sea_orm_migration::MigratorTrait;

use crate::seed::{Seeder, run_seeder};
use crate::seeds::users::{DefaultPasswordReset, DefaultUserSeeder};

mod seed;
mod seeds;

/// `seeder` creates missing default accounts; `seeder reset` also puts their
/// passwords back to the configured defaults.
#[tokio::main]
async fn main() -> ExitCode {
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("Migration failed: {e}");
        return ExitCode::FAILURE;
    }

    let seeders: Vec<(Box<dyn Seeder + Send + Sync>, &str)> =
        match env::args().nth(1).as_deref() {
            Some("reset") => vec![(Box::new(DefaultPasswordReset), "DefaultPasswords")],
            _ => vec![(Box::new(DefaultUserSeeder), "DefaultUsers")],
        };

    for (seeder, name) in seeders {
        if let Err(e) = run_seeder(&*seeder, name, &db).await {
            eprintln!("{name} seeder failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
