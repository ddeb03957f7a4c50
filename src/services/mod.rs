//! Service layer for business logic operations.
//!
//! Services encapsulate business rules and coordinate between
//! repositories and handlers.

mod cart_service;
mod costume_service;
mod rental_service;
mod user_service;

pub use cart_service::CartService;
pub use costume_service::CostumeService;
pub use rental_service::RentalService;
pub use user_service::UserService;

use crate::config::RentalConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning only bumps the reference counts of the repository handles.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub costumes: CostumeService,
    pub cart: CartService,
    pub rentals: RentalService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, rental: &RentalConfig) -> Self {
        Self {
            users: UserService::new(repos.users),
            costumes: CostumeService::new(repos.costumes.clone()),
            cart: CartService::new(repos.cart.clone(), repos.costumes),
            rentals: RentalService::new(repos.rentals, repos.cart, rental.period_days),
        }
    }
}
