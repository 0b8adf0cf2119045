use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect to a database by URL without running migrations.
///
/// SQLite connections are pinned to a single pooled connection so an
/// in-memory database is not silently duplicated per pool slot.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if database_url.starts_with("sqlite:") {
        options.max_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Single entrypoint for environment-configured startup: build the URL,
/// connect, and bring the schema up to date.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;
    let conn = connect_db(&database_url).await?;
    Migrator::up(&conn, None).await?;
    info!("database schema is up to date");
    Ok(conn)
}
