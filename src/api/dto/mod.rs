//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `costume` - Costume, Cart and CancelRental payloads
//! - `rental` - Rental payloads
//! - `auth` - Registration, login and token refresh
//! - `health` - Health report
//! - `error` - Common error response DTOs

mod auth;
mod costume;
mod error;
mod health;
mod rental;

pub use auth::{
    AuthResponse, LoginRequest, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
    UserInfo,
};
pub use costume::{CancelRentalRequest, CartRequest, CostumeResponse, CreateCostumeRequest};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use rental::RentalResponse;
