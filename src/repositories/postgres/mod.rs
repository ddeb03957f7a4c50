//! PostgreSQL adapters built on diesel_async and the bb8 pool.

mod cart_repo;
mod costume_repo;
mod rental_repo;
mod user_repo;

pub use cart_repo::PgCartRepository;
pub use costume_repo::PgCostumeRepository;
pub use rental_repo::PgRentalRepository;
pub use user_repo::PgUserRepository;
