//! Client construction, startup ping and shutdown.

use mongodb::{
    Client, Database,
    bson::doc,
    event::{EventHandler, command::CommandEvent},
    options::ClientOptions,
};
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Connected client plus the configured database.
#[derive(Clone, Debug)]
pub struct MongoHandle {
    pub client: Client,
    pub database: Database,
}

/// Builds the client from configuration and verifies it with a `ping`.
///
/// # Errors
///
/// - `AppError::Database` if the URL cannot be parsed or the server does not
///   answer within the connect timeout
pub async fn connect(config: &DatabaseConfig, app_name: &str) -> AppResult<MongoHandle> {
    info!(database = %config.database, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(|e| AppError::database("parse connection string", e))?;
    apply_config(&mut options, config, app_name);

    let client =
        Client::with_options(options).map_err(|e| AppError::database("create client", e))?;
    let database = client.database(&config.database);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::database("ping", e))?;

    info!("Connected to MongoDB");
    Ok(MongoHandle { client, database })
}

/// Closes pooled connections and waits for in-flight operations.
pub async fn disconnect(handle: MongoHandle) {
    info!("Disconnecting from MongoDB");
    handle.client.shutdown().await;
}

fn apply_config(options: &mut ClientOptions, config: &DatabaseConfig, app_name: &str) {
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());
    options.direct_connection = Some(config.direct_connection);
    if options.app_name.is_none() {
        options.app_name = Some(app_name.to_string());
    }
    if config.enable_log {
        options.command_event_handler = Some(EventHandler::callback(log_command_event));
    }
}

fn log_command_event(event: CommandEvent) {
    match event {
        CommandEvent::Started(e) => debug!(
            request_id = e.request_id,
            command = %e.command_name,
            db = %e.db,
            "MongoDB command started"
        ),
        CommandEvent::Succeeded(e) => debug!(
            request_id = e.request_id,
            command = %e.command_name,
            duration_ms = e.duration.as_millis() as u64,
            "MongoDB command succeeded"
        ),
        CommandEvent::Failed(e) => warn!(
            request_id = e.request_id,
            command = %e.command_name,
            duration_ms = e.duration.as_millis() as u64,
            error = %e.failure,
            "MongoDB command failed"
        ),
        _ => {}
    }
}
