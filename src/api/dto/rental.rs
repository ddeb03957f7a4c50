//! Rental payloads.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::dto::costume::fee_to_f64;
use crate::models::{Rental, RentalStatus};

/// A costume rented by a user
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Rental)]
pub struct RentalResponse {
    /// Absent on checkout previews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_id: Option<Uuid>,
    pub user_id: Uuid,
    pub costume_id: Uuid,
    /// Costume name at checkout time
    #[schema(example = "Gandalf the Grey")]
    pub costume_name: String,
    /// Fee charged, copied from the costume at checkout time
    #[schema(example = 50.00)]
    pub rental_fee: f64,
    pub status: RentalStatus,
    #[schema(value_type = String, format = DateTime)]
    pub rented_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub due_at: jiff::Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub returned_at: Option<jiff::Timestamp>,
}

impl RentalResponse {
    /// A rental that has not been stored yet.
    pub fn preview(rental: Rental) -> Self {
        Self {
            rental_id: None,
            ..Self::from(rental)
        }
    }
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            rental_id: Some(rental.id),
            user_id: rental.user_id,
            costume_id: rental.costume_id,
            rental_fee: fee_to_f64(&rental.rental_fee),
            costume_name: rental.costume_name,
            status: rental.status,
            rented_at: rental.rented_at.to_jiff(),
            due_at: rental.due_at.to_jiff(),
            returned_at: rental.returned_at.map(|t| t.to_jiff()),
        }
    }
}
