//! Rentals and the cart checkout transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff_diesel::ToDiesel;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{CartEntry, Costume, NewRental, Rental, RentalStatus};
use crate::repositories::traits::RentalRepository;
use crate::schema::{cart_entries, costumes, rentals};

#[derive(Clone)]
pub struct PgRentalRepository {
    pool: AsyncDbPool,
}

impl PgRentalRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn checkout(
        &self,
        user_id: Uuid,
        rented_at: jiff::Timestamp,
        period_days: u32,
    ) -> Result<Vec<Rental>, AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                // Deleting first claims the rows; a concurrent checkout for the
                // same user blocks on them and then finds nothing.
                let mut claimed: Vec<CartEntry> = diesel::delete(
                    cart_entries::table.filter(cart_entries::user_id.eq(user_id)),
                )
                .returning(CartEntry::as_returning())
                .get_results(conn)
                .await?;

                if claimed.is_empty() {
                    return Ok(Vec::new());
                }
                claimed.sort_by(|a, b| {
                    a.added_at
                        .to_jiff()
                        .cmp(&b.added_at.to_jiff())
                        .then_with(|| a.id.cmp(&b.id))
                });

                let costume_ids: Vec<Uuid> = claimed.iter().map(|e| e.costume_id).collect();
                let found: HashMap<Uuid, Costume> = costumes::table
                    .filter(costumes::id.eq_any(&costume_ids))
                    .select(Costume::as_select())
                    .load(conn)
                    .await?
                    .into_iter()
                    .map(|c| (c.id, c))
                    .collect();

                let new_rentals = claimed
                    .iter()
                    .map(|entry| {
                        found
                            .get(&entry.costume_id)
                            .map(|costume| {
                                NewRental::from_costume(user_id, costume, rented_at, period_days)
                            })
                            .ok_or_else(|| {
                                AppError::not_found("costume", "costumeId", entry.costume_id)
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                let mut created: Vec<Rental> = diesel::insert_into(rentals::table)
                    .values(&new_rentals)
                    .returning(Rental::as_returning())
                    .get_results(conn)
                    .await?;

                // RETURNING order is not guaranteed; restore cart order.
                let position: HashMap<Uuid, usize> = new_rentals
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (r.id, i))
                    .collect();
                created.sort_by_key(|r| position.get(&r.id).copied().unwrap_or(usize::MAX));

                Ok(created)
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_by_id(&self, rental_id: Uuid) -> Result<Option<Rental>, AppError> {
        let mut conn = self.pool.get().await?;

        rentals::table
            .filter(rentals::id.eq(rental_id))
            .select(Rental::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Rental>, AppError> {
        let mut conn = self.pool.get().await?;

        rentals::table
            .filter(rentals::user_id.eq(user_id))
            .order((rentals::rented_at.desc(), rentals::costume_name.asc()))
            .select(Rental::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn mark_returned(
        &self,
        rental_id: Uuid,
        returned_at: jiff::Timestamp,
    ) -> Result<Option<Rental>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            rentals::table
                .filter(rentals::id.eq(rental_id))
                .filter(rentals::status.eq(RentalStatus::Active)),
        )
        .set((
            rentals::status.eq(RentalStatus::Returned),
            rentals::returned_at.eq(returned_at.to_diesel()),
        ))
        .returning(Rental::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }
}
