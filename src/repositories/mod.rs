//! Repository layer for data access operations.
//!
//! Traits in `traits` are the ports; `postgres` and `memory` are the two
//! adapters, selected by `database.backend`.

mod memory;
mod postgres;
mod traits;

pub use memory::MemoryStore;
pub use postgres::{
    PgCartRepository, PgCostumeRepository, PgRentalRepository, PgUserRepository,
};
pub use traits::{CartRepository, CostumeRepository, RentalRepository, UserRepository};

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub costumes: Arc<dyn CostumeRepository>,
    pub cart: Arc<dyn CartRepository>,
    pub rentals: Arc<dyn RentalRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            costumes: Arc::new(PgCostumeRepository::new(pool.clone())),
            cart: Arc::new(PgCartRepository::new(pool.clone())),
            rentals: Arc::new(PgRentalRepository::new(pool)),
        }
    }

    /// Fresh in-memory repositories.
    pub fn memory() -> Self {
        Self::from_memory_store(Arc::new(MemoryStore::default()))
    }

    /// In-memory repositories over an existing store.
    pub fn from_memory_store(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            costumes: store.clone(),
            cart: store.clone(),
            rentals: store,
        }
    }
}
