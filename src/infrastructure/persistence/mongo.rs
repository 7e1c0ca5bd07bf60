//! MongoDB client setup.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::MongoConfig;
use crate::error::AppError;

const APP_NAME: &str = "user-management";
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to MongoDB and verifies the deployment answers a ping.
///
/// # Errors
///
/// Returns [`AppError::Database`] if the URI is invalid or the server is
/// unreachable.
pub async fn connect(config: &MongoConfig) -> Result<Database, AppError> {
    let mut options = ClientOptions::parse(config.connection_uri()).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);

    database.run_command(doc! { "ping": 1 }).await?;

    tracing::info!(database = %config.database, "Connected to MongoDB");
    Ok(database)
}
