//! Storage ports.
//!
//! Every backend implements all four traits; services only see `Arc<dyn ...>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CartEntry, Costume, NewCartEntry, NewCostume, NewUser, Rental, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A taken username or email yields `AppError::Duplicate`.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

#[async_trait]
pub trait CostumeRepository: Send + Sync {
    async fn create(&self, new_costume: NewCostume) -> AppResult<Costume>;

    async fn find_by_id(&self, costume_id: Uuid) -> AppResult<Option<Costume>>;

    /// All costumes ordered by name.
    async fn list_all(&self) -> AppResult<Vec<Costume>>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Add one entry. A costume already in the user's cart yields
    /// `AppError::Duplicate` and leaves the cart unchanged.
    async fn add(&self, entry: NewCartEntry) -> AppResult<CartEntry>;

    /// Remove one entry, returning whether it existed.
    async fn remove(&self, user_id: Uuid, costume_id: Uuid) -> AppResult<bool>;

    /// Costumes in the user's cart, oldest addition first.
    async fn list_costumes(&self, user_id: Uuid) -> AppResult<Vec<Costume>>;
}

#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Turn every cart entry of `user_id` into an active rental and empty the
    /// cart, all or nothing. An empty cart returns an empty list.
    async fn checkout(
        &self,
        user_id: Uuid,
        rented_at: jiff::Timestamp,
        period_days: u32,
    ) -> AppResult<Vec<Rental>>;

    async fn find_by_id(&self, rental_id: Uuid) -> AppResult<Option<Rental>>;

    /// Rentals of one user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Rental>>;

    /// Flip an active rental to returned. `None` if it is not active (or gone).
    async fn mark_returned(
        &self,
        rental_id: Uuid,
        returned_at: jiff::Timestamp,
    ) -> AppResult<Option<Rental>>;
}
