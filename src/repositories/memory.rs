//! In-memory storage backend.
//!
//! One `MemoryStore` implements every repository trait. Each user's cart is a
//! single `DashMap` entry, so add, remove and checkout run under that entry's
//! write lock and never interleave for the same user. Nothing survives a
//! restart.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CartEntry, Costume, NewCartEntry, NewCostume, NewRental, NewUser, Rental, RentalStatus, User,
};
use crate::repositories::traits::{
    CartRepository, CostumeRepository, RentalRepository, UserRepository,
};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    /// email -> user id, doubles as the uniqueness guard
    emails: DashMap<String, Uuid>,
    /// username -> user id
    usernames: DashMap<String, Uuid>,
    costumes: DashMap<Uuid, Costume>,
    /// user id -> entries in insertion order
    carts: DashMap<Uuid, Vec<CartEntry>>,
    rentals: DashMap<Uuid, Rental>,
    next_cart_entry_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(entity: &str, field: &str, value: impl ToString) -> AppError {
    AppError::Duplicate {
        entity: entity.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        match self.emails.entry(new_user.email.clone()) {
            Entry::Occupied(_) => return Err(duplicate("user", "email", &new_user.email)),
            Entry::Vacant(slot) => {
                slot.insert(new_user.id);
            }
        }

        match self.usernames.entry(new_user.username.clone()) {
            Entry::Occupied(_) => {
                self.emails.remove(&new_user.email);
                return Err(duplicate("user", "username", &new_user.username));
            }
            Entry::Vacant(slot) => {
                slot.insert(new_user.id);
            }
        }

        let user = User::from(new_user);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&user_id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(user_id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&user_id).map(|u| u.clone()))
    }
}

#[async_trait]
impl CostumeRepository for MemoryStore {
    async fn create(&self, new_costume: NewCostume) -> AppResult<Costume> {
        if !self.users.contains_key(&new_costume.user_id) {
            return Err(AppError::not_found("user", "userId", new_costume.user_id));
        }

        let costume = Costume::from(new_costume);
        self.costumes.insert(costume.id, costume.clone());
        Ok(costume)
    }

    async fn find_by_id(&self, costume_id: Uuid) -> AppResult<Option<Costume>> {
        Ok(self.costumes.get(&costume_id).map(|c| c.clone()))
    }

    async fn list_all(&self) -> AppResult<Vec<Costume>> {
        let mut costumes: Vec<Costume> = self.costumes.iter().map(|c| c.clone()).collect();
        costumes.sort_by(|a, b| {
            a.costume_name
                .cmp(&b.costume_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(costumes)
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn add(&self, entry: NewCartEntry) -> AppResult<CartEntry> {
        if !self.users.contains_key(&entry.user_id) {
            return Err(AppError::not_found("user", "userId", entry.user_id));
        }
        if !self.costumes.contains_key(&entry.costume_id) {
            return Err(AppError::not_found("costume", "costumeId", entry.costume_id));
        }

        let mut cart = self.carts.entry(entry.user_id).or_default();
        if cart.iter().any(|e| e.costume_id == entry.costume_id) {
            return Err(duplicate("cart entry", "costumeId", entry.costume_id));
        }

        let stored = CartEntry {
            id: self.next_cart_entry_id.fetch_add(1, Ordering::Relaxed) + 1,
            user_id: entry.user_id,
            costume_id: entry.costume_id,
            added_at: entry.added_at,
        };
        cart.push(stored.clone());
        Ok(stored)
    }

    async fn remove(&self, user_id: Uuid, costume_id: Uuid) -> AppResult<bool> {
        let Some(mut cart) = self.carts.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = cart.len();
        cart.retain(|e| e.costume_id != costume_id);
        Ok(cart.len() != before)
    }

    async fn list_costumes(&self, user_id: Uuid) -> AppResult<Vec<Costume>> {
        let entries = match self.carts.get(&user_id) {
            Some(cart) => cart.clone(),
            None => return Ok(Vec::new()),
        };

        Ok(entries
            .iter()
            .filter_map(|e| self.costumes.get(&e.costume_id).map(|c| c.clone()))
            .collect())
    }
}

#[async_trait]
impl RentalRepository for MemoryStore {
    async fn checkout(
        &self,
        user_id: Uuid,
        rented_at: jiff::Timestamp,
        period_days: u32,
    ) -> AppResult<Vec<Rental>> {
        if !self.users.contains_key(&user_id) {
            return Err(AppError::not_found("user", "userId", user_id));
        }
        let Some(mut cart) = self.carts.get_mut(&user_id) else {
            return Ok(Vec::new());
        };

        // Resolve everything before writing so a missing costume leaves the
        // cart untouched.
        let mut pending = Vec::with_capacity(cart.len());
        for entry in cart.iter() {
            let costume = self
                .costumes
                .get(&entry.costume_id)
                .ok_or_else(|| AppError::not_found("costume", "costumeId", entry.costume_id))?;
            pending.push(NewRental::from_costume(
                user_id,
                &costume,
                rented_at,
                period_days,
            ));
        }

        let rentals: Vec<Rental> = pending.into_iter().map(Rental::from).collect();
        for rental in &rentals {
            self.rentals.insert(rental.id, rental.clone());
        }
        cart.clear();

        Ok(rentals)
    }

    async fn find_by_id(&self, rental_id: Uuid) -> AppResult<Option<Rental>> {
        Ok(self.rentals.get(&rental_id).map(|r| r.clone()))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Rental>> {
        let mut rentals: Vec<Rental> = self
            .rentals
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.clone())
            .collect();
        rentals.sort_by(|a, b| {
            b.rented_at
                .to_jiff()
                .cmp(&a.rented_at.to_jiff())
                .then_with(|| a.costume_name.cmp(&b.costume_name))
        });
        Ok(rentals)
    }

    async fn mark_returned(
        &self,
        rental_id: Uuid,
        returned_at: jiff::Timestamp,
    ) -> AppResult<Option<Rental>> {
        let Some(mut rental) = self.rentals.get_mut(&rental_id) else {
            return Ok(None);
        };
        if rental.status != RentalStatus::Active {
            return Ok(None);
        }

        rental.status = RentalStatus::Returned;
        rental.returned_at = Some(returned_at.to_diesel());
        Ok(Some(rental.clone()))
    }
}
