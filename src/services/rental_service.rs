//! Checkout and rental history.
//!
//! A checkout can be previewed any number of times; only `checkout` moves
//! cart entries into stored rentals.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewRental, Rental, RentalStatus};
use crate::repositories::{CartRepository, RentalRepository};

#[derive(Clone)]
pub struct RentalService {
    rentals: Arc<dyn RentalRepository>,
    cart: Arc<dyn CartRepository>,
    period_days: u32,
}

impl RentalService {
    pub fn new(
        rentals: Arc<dyn RentalRepository>,
        cart: Arc<dyn CartRepository>,
        period_days: u32,
    ) -> Self {
        Self {
            rentals,
            cart,
            period_days,
        }
    }

    /// The rentals the user's cart would turn into right now, with status
    /// `Pending`. Nothing is stored.
    pub async fn preview_checkout(&self, user_id: Uuid) -> AppResult<Vec<Rental>> {
        let now = jiff::Timestamp::now();
        let costumes = self.cart.list_costumes(user_id).await?;

        Ok(costumes
            .iter()
            .map(|costume| {
                let mut rental = NewRental::from_costume(user_id, costume, now, self.period_days);
                rental.status = RentalStatus::Pending;
                Rental::from(rental)
            })
            .collect())
    }

    /// Converts the whole cart into active rentals and empties it.
    ///
    /// An empty cart is a `BadRequest`.
    pub async fn checkout(&self, user_id: Uuid) -> AppResult<Vec<Rental>> {
        let rentals = self
            .rentals
            .checkout(user_id, jiff::Timestamp::now(), self.period_days)
            .await?;

        if rentals.is_empty() {
            return Err(AppError::BadRequest {
                message: "Cart is empty".to_string(),
            });
        }

        tracing::info!(user_id = %user_id, count = rentals.len(), "Checkout completed");
        Ok(rentals)
    }

    /// Rentals of one user, newest first.
    pub async fn list_rentals(&self, user_id: Uuid) -> AppResult<Vec<Rental>> {
        self.rentals.list_for_user(user_id).await
    }

    /// One of the user's rentals. Other users' rentals are reported as
    /// `NotFound`.
    pub async fn get_rental(&self, user_id: Uuid, rental_id: Uuid) -> AppResult<Rental> {
        self.rentals
            .find_by_id(rental_id)
            .await?
            .filter(|rental| rental.user_id == user_id)
            .ok_or_else(|| AppError::not_found("rental", "rentalId", rental_id))
    }

    /// Marks an active rental as returned.
    ///
    /// # Errors
    /// * `NotFound` for unknown rentals or rentals of other users
    /// * `Conflict` when it was already returned
    pub async fn return_rental(&self, user_id: Uuid, rental_id: Uuid) -> AppResult<Rental> {
        self.get_rental(user_id, rental_id).await?;

        match self
            .rentals
            .mark_returned(rental_id, jiff::Timestamp::now())
            .await?
        {
            Some(rental) => {
                tracing::info!(user_id = %user_id, rental_id = %rental_id, "Rental returned");
                Ok(rental)
            }
            None => Err(AppError::Conflict {
                message: format!("Rental {} is not active", rental_id),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Costume, NewCartEntry, NewCostume, NewUser, User};
    use crate::repositories::{CostumeRepository, MemoryStore, UserRepository};
    use jiff_diesel::ToDiesel;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: RentalService,
        user: User,
        costume: Costume,
    }

    async fn seed_user(store: &MemoryStore, name: &str) -> User {
        UserRepository::create(
            store,
            NewUser::new(name.into(), format!("{}@example.com", name), "h".into()),
        )
        .await
        .unwrap()
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let user = seed_user(&store, "renter").await;
        let costume = CostumeRepository::create(
            store.as_ref(),
            NewCostume {
                id: Uuid::new_v4(),
                user_id: user.id,
                costume_name: "Gandalf the Grey".to_string(),
                category: "Fantasy".to_string(),
                rental_fee: "50.00".parse().unwrap(),
                size: "Adult Medium".to_string(),
                image_url: "https://example.com/g.png".to_string(),
                description: "Wizard".to_string(),
                created_at: jiff::Timestamp::now().to_diesel(),
            },
        )
        .await
        .unwrap();

        Fixture {
            service: RentalService::new(store.clone(), store.clone(), 7),
            store,
            user,
            costume,
        }
    }

    impl Fixture {
        async fn fill_cart(&self) {
            self.store
                .add(NewCartEntry::new(self.user.id, self.costume.id))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_preview_has_no_side_effects() {
        let f = fixture().await;
        f.fill_cart().await;

        let preview = f.service.preview_checkout(f.user.id).await.unwrap();
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0].status, RentalStatus::Pending);
        assert_eq!(preview[0].rental_fee, f.costume.rental_fee);

        assert_eq!(f.store.list_costumes(f.user.id).await.unwrap().len(), 1);
        assert!(f.service.list_rentals(f.user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_then_empty_cart() {
        let f = fixture().await;
        f.fill_cart().await;

        let rentals = f.service.checkout(f.user.id).await.unwrap();
        assert_eq!(rentals.len(), 1);
        assert_eq!(rentals[0].status, RentalStatus::Active);
        assert_eq!(rentals[0].costume_name, "Gandalf the Grey");

        assert!(matches!(
            f.service.checkout(f.user.id).await,
            Err(AppError::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_rentals_are_private() {
        let f = fixture().await;
        f.fill_cart().await;
        let rental = f.service.checkout(f.user.id).await.unwrap().remove(0);
        let stranger = seed_user(&f.store, "stranger").await;

        assert_eq!(
            f.service.get_rental(f.user.id, rental.id).await.unwrap().id,
            rental.id
        );
        assert!(matches!(
            f.service.get_rental(stranger.id, rental.id).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            f.service.return_rental(stranger.id, rental.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_return_twice_conflicts() {
        let f = fixture().await;
        f.fill_cart().await;
        let rental = f.service.checkout(f.user.id).await.unwrap().remove(0);

        let returned = f.service.return_rental(f.user.id, rental.id).await.unwrap();
        assert_eq!(returned.status, RentalStatus::Returned);

        assert!(matches!(
            f.service.return_rental(f.user.id, rental.id).await,
            Err(AppError::Conflict { .. })
        ));
    }
}
