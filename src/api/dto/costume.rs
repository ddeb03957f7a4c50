//! Costume, Cart and CancelRental payloads.

use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Costume, NewCostume};

/// A costume available for rent
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Costume)]
pub struct CostumeResponse {
    /// Server-generated identifier
    pub costume_id: Uuid,
    #[schema(example = "Gandalf the Grey")]
    pub costume_name: String,
    #[schema(example = "Fantasy")]
    pub category: String,
    #[schema(example = 50.00, minimum = 0.0)]
    pub rental_fee: f64,
    #[schema(example = "Adult Medium")]
    pub size: String,
    #[schema(example = "https://example.com/images/gandalf.png", format = "uri")]
    pub image_url: String,
    #[schema(
        example = "Summon your inner wizard with this realistic version of Gandalf's Costume."
    )]
    pub description: String,
    /// The user who listed the costume
    pub user_id: Uuid,
}

impl From<Costume> for CostumeResponse {
    fn from(costume: Costume) -> Self {
        Self {
            costume_id: costume.id,
            costume_name: costume.costume_name,
            category: costume.category,
            rental_fee: fee_to_f64(&costume.rental_fee),
            size: costume.size,
            image_url: costume.image_url,
            description: costume.description,
            user_id: costume.user_id,
        }
    }
}

/// Money leaves the API as a plain JSON number, rounded to cents.
pub(crate) fn fee_to_f64(fee: &BigDecimal) -> f64 {
    let cents = (fee.to_f64().unwrap_or_default() * 100.0).round();
    cents / 100.0
}

/// Listing payload for a new costume. The owner is the caller.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCostumeRequest {
    #[validate(length(min = 1, max = 200, message = "costumeName is required"))]
    #[schema(example = "Gandalf the Grey")]
    pub costume_name: String,
    #[validate(length(min = 1, max = 100, message = "category is required"))]
    #[schema(example = "Fantasy")]
    pub category: String,
    #[validate(range(min = 0.0, max = 1000000.0, message = "rentalFee must be between 0 and 1000000"))]
    #[schema(example = 50.00, minimum = 0.0)]
    pub rental_fee: f64,
    #[validate(length(min = 1, max = 50, message = "size is required"))]
    #[schema(example = "Adult Medium")]
    pub size: String,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    #[schema(example = "https://example.com/images/gandalf.png", format = "uri")]
    pub image_url: String,
    #[validate(length(min = 1, message = "description is required"))]
    #[schema(
        example = "Summon your inner wizard with this realistic version of Gandalf's Costume."
    )]
    pub description: String,
}

impl CreateCostumeRequest {
    /// Builds the insertable row; the fee is rounded to cents.
    pub fn into_new_costume(self, owner: Uuid) -> AppResult<NewCostume> {
        let rental_fee =
            BigDecimal::from_str(&format!("{:.2}", self.rental_fee)).map_err(|_| {
                AppError::Validation {
                    field: "rentalFee".to_string(),
                    reason: "must be a decimal number".to_string(),
                }
            })?;

        Ok(NewCostume {
            id: Uuid::new_v4(),
            user_id: owner,
            costume_name: self.costume_name,
            category: self.category,
            rental_fee,
            size: self.size,
            image_url: self.image_url,
            description: self.description,
            created_at: jiff::Timestamp::now().to_diesel(),
        })
    }
}

/// Adds a costume to a user's cart
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(as = Cart)]
pub struct CartRequest {
    #[validate(length(min = 1, message = "costumeId is required"))]
    #[schema(example = "3f0e4a4e-8d7c-4d59-bb47-4c2b0b2b7a11")]
    pub costume_id: String,
    /// Must be the authenticated user
    #[validate(length(min = 1, message = "userId is required"))]
    #[schema(example = "6f1c1b8e-3a8e-4b8f-9a51-6a1a2f0f7e10")]
    pub user_id: String,
}

/// Removes a costume from the caller's cart
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(as = CancelRental)]
pub struct CancelRentalRequest {
    #[validate(length(min = 1, message = "costumeId is required"))]
    #[schema(example = "3f0e4a4e-8d7c-4d59-bb47-4c2b0b2b7a11")]
    pub costume_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(fee: f64) -> CreateCostumeRequest {
        CreateCostumeRequest {
            costume_name: "Gandalf the Grey".to_string(),
            category: "Fantasy".to_string(),
            rental_fee: fee,
            size: "Adult Medium".to_string(),
            image_url: "https://example.com/gandalf.png".to_string(),
            description: "Wizard".to_string(),
        }
    }

    #[test]
    fn test_fee_is_rounded_to_cents() {
        let owner = Uuid::new_v4();
        let costume = request(19.999).into_new_costume(owner).unwrap();
        assert_eq!(costume.rental_fee, "20.00".parse::<BigDecimal>().unwrap());
        assert_eq!(costume.user_id, owner);
    }

    #[test]
    fn test_negative_fee_fails_validation() {
        assert!(request(-0.01).validate().is_err());
        assert!(request(0.0).validate().is_ok());
    }

    #[test]
    fn test_bad_image_url_fails_validation() {
        let mut req = request(10.0);
        req.image_url = "not a url".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_is_camel_case() {
        let costume = Costume::from(request(50.0).into_new_costume(Uuid::new_v4()).unwrap());
        let json = serde_json::to_value(CostumeResponse::from(costume)).unwrap();

        for field in [
            "costumeId",
            "costumeName",
            "category",
            "rentalFee",
            "size",
            "imageUrl",
            "description",
            "userId",
        ] {
            assert!(!json[field].is_null(), "missing {}", field);
        }
        assert_eq!(json["rentalFee"], 50.0);
    }

    #[test]
    fn test_cart_request_requires_both_fields() {
        let missing: Result<CartRequest, _> =
            serde_json::from_str(r#"{"costumeId":"abc"}"#);
        assert!(missing.is_err());

        let empty: CartRequest =
            serde_json::from_str(r#"{"costumeId":"","userId":"u"}"#).unwrap();
        assert!(empty.validate().is_err());
    }
}
