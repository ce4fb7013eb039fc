//! Server module for managing HTTP server lifecycle
//!
//! Startup connects the store before binding; shutdown stops intake, drains
//! in-flight requests within the grace period, then disconnects the store.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::db;
use crate::repositories::{MongoUserRepository, Repositories};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// - Store connection or index creation failures
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env().unwrap_or_default(),
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            shutdown_timeout = settings.server.shutdown_timeout,
            "Server configuration loaded"
        );

        // URL omitted: it may carry credentials
        tracing::info!(
            database = %settings.database.database,
            max_pool_size = settings.database.max_pool_size,
            min_pool_size = settings.database.min_pool_size,
            connect_timeout = settings.database.connect_timeout,
            operation_timeout = settings.database.operation_timeout,
            enable_log = settings.database.enable_log,
            "Database configuration loaded"
        );

        let handle = db::connect(&settings.database, &settings.application.name).await?;

        let users = MongoUserRepository::new(handle.database.clone());
        users.init_indexes().await?;

        let state = AppState::new(
            Repositories::new(Arc::new(users)),
            settings.database.operation_timeout(),
        );
        let router = create_router(state, settings.server.request_timeout());

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;
        tracing::info!(address = %address, "Server listening");

        let shutdown = CancellationToken::new();
        tokio::spawn(cancel_on_signal(shutdown.clone()));

        let served = serve(listener, router, shutdown, settings.server.shutdown_timeout()).await;

        db::disconnect(handle).await;
        tracing::info!("Server shutdown complete");

        served
    }
}

/// Serves until `shutdown` is cancelled, then gives in-flight requests
/// `grace` to finish before returning.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> anyhow::Result<()> {
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = shutdown.cancelled() => {
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => result?,
                Err(_) => tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Shutdown grace period elapsed, dropping remaining connections"
                ),
            }
        }
    }

    Ok(())
}

async fn cancel_on_signal(token: CancellationToken) {
    shutdown_signal().await;
    token.cancel();
}

/// Waits for Ctrl+C or SIGTERM. A handler that cannot be installed never
/// fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
