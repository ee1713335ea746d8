//! Storage layer - database entities and repositories

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

use crate::config::Config;
use crate::contract::RecordsError;
use migrations::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Open the configured database and bring the schema up to date.
///
/// Migration failures are surfaced unchanged from the migration tool as
/// `RecordsError::Migration`.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, RecordsError> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    if config.database_url.contains(":memory:") {
        // An in-memory SQLite database is private to its connection; a
        // wider pool would hand out connections with an empty schema.
        options.max_connections(1);
    }

    let db = Database::connect(options).await.map_err(|err| {
        tracing::error!("failed to connect to {}: {}", config.database_url, err);
        RecordsError::Internal
    })?;

    Migrator::up(&db, None)
        .await
        .map_err(|err| RecordsError::Migration {
            message: err.to_string(),
        })?;
    tracing::info!("employee records migrations completed");

    Ok(db)
}
