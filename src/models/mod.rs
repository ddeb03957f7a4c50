mod cart;
mod costume;
mod rental;
mod user;

pub use cart::{CartEntry, NewCartEntry};
pub use costume::{Costume, NewCostume};
pub use rental::{NewRental, Rental, RentalStatus};
pub use user::{NewUser, User};
