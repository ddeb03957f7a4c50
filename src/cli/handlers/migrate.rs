//! Migrate command handler
//!
//! Applies, previews or rolls back the embedded migrations against the
//! configured PostgreSQL database.

use crate::config::DatabaseBackend;
use crate::config::settings::Settings;
use crate::db;
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.database.backend != DatabaseBackend::Postgres {
            return Err(AppError::Validation {
                field: "database.backend".to_string(),
                reason: "migrations require the postgres backend".to_string(),
            });
        }

        match (dry_run, rollback) {
            (_, Some(steps)) => self.rollback(steps).await,
            (true, None) => self.show_pending().await,
            (false, None) => self.run().await,
        }
    }

    async fn show_pending(&self) -> AppResult<()> {
        let pending = db::pending_migrations(self.config.database.url.clone()).await?;

        if pending.is_empty() {
            println!("No pending migrations");
        } else {
            println!("Pending migrations ({}):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
        }
        Ok(())
    }

    async fn run(&self) -> AppResult<()> {
        let applied = db::run_pending_migrations(self.config.database.url.clone()).await?;

        for version in &applied {
            tracing::info!(version = %version, "Applied migration");
        }
        println!("Applied {} migration(s)", applied.len());
        Ok(())
    }

    async fn rollback(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let reverted = db::revert_migrations(self.config.database.url.clone(), steps).await?;
        for version in &reverted {
            tracing::warn!(version = %version, "Reverted migration");
        }
        if reverted.len() < steps as usize {
            println!(
                "Reverted {} of {} requested migration(s); nothing left to revert",
                reverted.len(),
                steps
            );
        } else {
            println!("Reverted {} migration(s)", reverted.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres_config() -> Settings {
        let mut config = Settings::default();
        config.database.backend = DatabaseBackend::Postgres;
        config.database.url = "postgres://localhost/costumes".to_string();
        config
    }

    #[tokio::test]
    async fn test_memory_backend_rejected() {
        let handler = MigrateCommandHandler::new(Settings::default());
        match handler.execute(false, None).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "database.backend"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_rollback_steps() {
        let handler = MigrateCommandHandler::new(postgres_config());
        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("must be greater than 0"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
