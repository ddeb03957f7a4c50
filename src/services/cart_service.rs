//! Cart operations. The cart is the staging area before checkout.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Costume, NewCartEntry};
use crate::repositories::{CartRepository, CostumeRepository};

#[derive(Clone)]
pub struct CartService {
    cart: Arc<dyn CartRepository>,
    costumes: Arc<dyn CostumeRepository>,
}

impl CartService {
    pub fn new(cart: Arc<dyn CartRepository>, costumes: Arc<dyn CostumeRepository>) -> Self {
        Self { cart, costumes }
    }

    /// Costumes in the user's cart, oldest addition first.
    pub async fn list_cart(&self, user_id: Uuid) -> AppResult<Vec<Costume>> {
        self.cart.list_costumes(user_id).await
    }

    /// Adds a costume to `caller`'s cart on behalf of `owner`.
    ///
    /// # Errors
    /// * `Forbidden` when `owner` is not the caller
    /// * `NotFound` when the costume does not exist
    /// * `Duplicate` when the costume is already in the cart
    pub async fn add_to_cart(
        &self,
        caller: Uuid,
        owner: Uuid,
        costume_id: Uuid,
    ) -> AppResult<Costume> {
        if caller != owner {
            return Err(AppError::Forbidden {
                message: "Cannot modify another user's cart".to_string(),
            });
        }

        let costume = self
            .costumes
            .find_by_id(costume_id)
            .await?
            .ok_or_else(|| AppError::not_found("costume", "costumeId", costume_id))?;

        self.cart.add(NewCartEntry::new(caller, costume_id)).await?;
        tracing::debug!(user_id = %caller, costume_id = %costume_id, "Added to cart");
        Ok(costume)
    }

    /// Removes a costume from the cart and returns it.
    ///
    /// A costume that is not in the cart is `NotFound`, even if it exists.
    pub async fn cancel(&self, user_id: Uuid, costume_id: Uuid) -> AppResult<Costume> {
        let not_in_cart = || AppError::not_found("cart entry", "costumeId", costume_id);

        let costume = self
            .costumes
            .find_by_id(costume_id)
            .await?
            .ok_or_else(not_in_cart)?;

        if !self.cart.remove(user_id, costume_id).await? {
            return Err(not_in_cart());
        }

        tracing::debug!(user_id = %user_id, costume_id = %costume_id, "Removed from cart");
        Ok(costume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCostume, NewUser, User};
    use crate::repositories::{MemoryStore, UserRepository};
    use jiff_diesel::ToDiesel;

    struct Fixture {
        service: CartService,
        user: User,
        costume: Costume,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let user = UserRepository::create(
            store.as_ref(),
            NewUser::new("renter".into(), "renter@example.com".into(), "h".into()),
        )
        .await
        .unwrap();
        let costume = CostumeRepository::create(
            store.as_ref(),
            NewCostume {
                id: Uuid::new_v4(),
                user_id: user.id,
                costume_name: "Zorro".to_string(),
                category: "Hero".to_string(),
                rental_fee: "20.00".parse().unwrap(),
                size: "Adult Large".to_string(),
                image_url: "https://example.com/z.png".to_string(),
                description: "Masked swordsman".to_string(),
                created_at: jiff::Timestamp::now().to_diesel(),
            },
        )
        .await
        .unwrap();

        Fixture {
            service: CartService::new(store.clone(), store),
            user,
            costume,
        }
    }

    #[tokio::test]
    async fn test_add_then_cancel_restores_cart() {
        let f = fixture().await;

        let added = f
            .service
            .add_to_cart(f.user.id, f.user.id, f.costume.id)
            .await
            .unwrap();
        assert_eq!(added.id, f.costume.id);
        assert_eq!(f.service.list_cart(f.user.id).await.unwrap().len(), 1);

        let removed = f.service.cancel(f.user.id, f.costume.id).await.unwrap();
        assert_eq!(removed.id, f.costume.id);
        assert!(f.service.list_cart(f.user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_for_someone_else_is_forbidden() {
        let f = fixture().await;
        assert!(matches!(
            f.service
                .add_to_cart(f.user.id, Uuid::new_v4(), f.costume.id)
                .await,
            Err(AppError::Forbidden { .. })
        ));
        assert!(f.service.list_cart(f.user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_twice_is_duplicate() {
        let f = fixture().await;
        f.service
            .add_to_cart(f.user.id, f.user.id, f.costume.id)
            .await
            .unwrap();
        assert!(matches!(
            f.service
                .add_to_cart(f.user.id, f.user.id, f.costume.id)
                .await,
            Err(AppError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancel_not_in_cart() {
        let f = fixture().await;
        assert!(matches!(
            f.service.cancel(f.user.id, f.costume.id).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            f.service.cancel(f.user.id, Uuid::new_v4()).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
