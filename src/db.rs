//! Database connection handling for the sea-orm storage backend.

use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::AppConfig;
use crate::migrator::Migrator;

/// Establish a connection pool using the pool tuning from configuration.
pub async fn establish_connection(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let url = cfg
        .database_url
        .as_deref()
        .context("database_url missing for database backend")?;

    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(cfg.db_max_connections)
        .min_connections(cfg.db_min_connections)
        .connect_timeout(Duration::from_secs(cfg.db_connect_timeout_secs))
        .sqlx_logging(cfg.is_development());

    info!(
        max_connections = cfg.db_max_connections,
        "connecting to database"
    );
    let pool = Database::connect(options)
        .await
        .context("database connection establishment failed")?;
    info!("database connection pool established");
    Ok(pool)
}

/// Run all pending migrations.
pub async fn run_migrations(pool: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(pool, None)
        .await
        .context("running migrations failed")?;
    info!("migrations applied");
    Ok(())
}
