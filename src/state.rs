//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::{DatabaseBackend, JwtConfig, RentalConfig, Settings};
use crate::db::{AsyncDbPool, establish_async_connection_pool};
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap: services hold `Arc`s and the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// The PostgreSQL pool, absent on the in-memory backend
    pub db_pool: Option<AsyncDbPool>,
    /// JWT configuration for token generation and validation
    pub jwt_config: JwtConfig,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        db_pool: Option<AsyncDbPool>,
        jwt_config: JwtConfig,
        rental: &RentalConfig,
    ) -> Self {
        Self {
            services: Services::new(repos, rental),
            db_pool,
            jwt_config,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(jwt_config: JwtConfig, rental: &RentalConfig) -> Self {
        Self::new(Repositories::memory(), None, jwt_config, rental)
    }

    /// Builds the state for the configured storage backend, opening the
    /// connection pool when it is PostgreSQL.
    pub async fn from_settings(settings: &Settings) -> AppResult<Self> {
        match settings.database.backend {
            DatabaseBackend::Memory => Ok(Self::in_memory(
                settings.jwt.clone(),
                &settings.rental,
            )),
            DatabaseBackend::Postgres => {
                let pool = establish_async_connection_pool(&settings.database).await?;
                Ok(Self::new(
                    Repositories::postgres(pool.clone()),
                    Some(pool),
                    settings.jwt.clone(),
                    &settings.rental,
                ))
            }
        }
    }
}
