//! Cart entries; uniqueness of `(user_id, costume_id)` is enforced by the
//! `cart_entries_user_id_costume_id_key` constraint.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{CartEntry, Costume, NewCartEntry};
use crate::repositories::traits::CartRepository;
use crate::schema::{cart_entries, costumes};

#[derive(Clone)]
pub struct PgCartRepository {
    pool: AsyncDbPool,
}

impl PgCartRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn add(&self, entry: NewCartEntry) -> Result<CartEntry, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(cart_entries::table)
            .values(&entry)
            .returning(CartEntry::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn remove(&self, user_id: Uuid, costume_id: Uuid) -> Result<bool, AppError> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            cart_entries::table
                .filter(cart_entries::user_id.eq(user_id))
                .filter(cart_entries::costume_id.eq(costume_id)),
        )
        .execute(&mut conn)
        .await?;

        Ok(deleted > 0)
    }

    async fn list_costumes(&self, user_id: Uuid) -> Result<Vec<Costume>, AppError> {
        let mut conn = self.pool.get().await?;

        cart_entries::table
            .inner_join(costumes::table)
            .filter(cart_entries::user_id.eq(user_id))
            .order((cart_entries::added_at.asc(), cart_entries::id.asc()))
            .select(Costume::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
