//! Serve command handler

use crate::config::DatabaseBackend;
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Starts the server, or only validates the configuration on `dry_run`.
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config.clone()).run().await
    }

    /// Everything `run` would check before binding, without side effects.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        self.config.jwt.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            DatabaseBackend::Memory => println!("✓ Storage: in-memory (not persisted)"),
            DatabaseBackend::Postgres => println!(
                "✓ Storage: postgres (pool {}..{}, auto-migrate: {})",
                self.config.database.min_connections,
                self.config.database.max_connections,
                self.config.database.auto_migrate
            ),
        }
        println!("✓ Rental period: {} days", self.config.rental.period_days);
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.jwt.secret = "a-dry-run-secret-that-is-long-enough".to_string();
        config
    }

    #[tokio::test]
    async fn test_dry_run() {
        let handler = ServeCommandHandler::new(valid_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_port() {
        let mut config = valid_config();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);
        assert!(handler.execute(true).await.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_requires_jwt_secret() {
        let handler = ServeCommandHandler::new(Settings::default());
        match handler.execute(true).await {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "jwt.secret"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }
}
