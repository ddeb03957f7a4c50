//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod auth;
pub mod cart;
pub mod costumes;
pub mod health;
pub mod rentals;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Parses an id taken from the URL. Anything that is not a UUID cannot
/// name a stored record, so it is reported as not found.
pub(crate) fn parse_path_id(entity: &str, field: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(entity, field, raw))
}

/// Parses an id taken from a request body.
pub(crate) fn parse_body_id(field: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation {
        field: field.to_string(),
        reason: "must be a UUID".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path_id_is_not_found() {
        match parse_path_id("costume", "costumeId", "not-a-uuid") {
            Err(AppError::NotFound { value, .. }) => assert_eq!(value, "not-a-uuid"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_body_id_is_validation() {
        assert!(matches!(
            parse_body_id("userId", "42"),
            Err(AppError::Validation { .. })
        ));
        let id = Uuid::new_v4();
        assert_eq!(parse_body_id("userId", &format!(" {} ", id)).unwrap(), id);
    }
}
