pub mod id;
pub mod models;
pub mod repository;

use mongodb::bson::doc;
use mongodb::{Client, Database};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the database layer.
///
/// Absence ("no such document", "malformed identifier") is never an error
/// here; repositories report it as `None` or an empty list. This enum only
/// carries genuine driver failures.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Build the store client once at startup.
///
/// The driver connects lazily, so this succeeds even while the deployment is
/// still coming up; the first operation (or the health ping) surfaces
/// connectivity problems.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, DatabaseError> {
    let client = Client::with_uri_str(&config.uri).await?;
    info!("MongoDB client initialized for database: {}", config.name);
    Ok(client.database(&config.name))
}

/// Pings the deployment to confirm connectivity.
pub async fn ping(db: &Database) -> Result<(), DatabaseError> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
