//! HTTP server lifecycle: startup checks, binding and graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{DatabaseBackend, Environment, settings::Settings};
use crate::db;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs until Ctrl+C or SIGTERM.
    ///
    /// Fails before binding when the JWT settings are unusable, the pool
    /// cannot be opened, or auto-migration fails.
    pub async fn run(self) -> AppResult<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            backend = %self.settings.database.backend.as_str(),
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            auto_migrate = %self.settings.database.auto_migrate,
            "Storage configuration loaded"
        );

        tracing::info!(
            access_token_expiration = %self.settings.jwt.access_token_expiration,
            refresh_token_expiration = %self.settings.jwt.refresh_token_expiration,
            secret_configured = %(!self.settings.jwt.secret.is_empty()),
            rental_period_days = %self.settings.rental.period_days,
            "Auth and rental configuration loaded"
        );

        self.settings.jwt.validate().inspect_err(|e| {
            tracing::error!(error = %e, "JWT configuration validation failed");
        })?;

        if self.settings.database.backend == DatabaseBackend::Postgres
            && self.settings.database.auto_migrate
        {
            let applied = db::run_pending_migrations(self.settings.database.url.clone()).await?;
            tracing::info!(count = applied.len(), "Pending migrations applied");
        }

        let state = AppState::from_settings(&self.settings).await?;
        if state.db_pool.is_none() {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
        }

        let router = create_router(state);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            AppError::Internal {
                source: anyhow::anyhow!("Failed to bind to {}: {}", address, e),
            }
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::new(e),
            })?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Completes on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and never fires.
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
