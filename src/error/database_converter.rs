use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint names are the ones created by the embedded migrations, so each
/// violation can be reported against the API field the client actually sent.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint = info.constraint_name().and_then(Self::describe_constraint);
        let key_value = Self::extract_key_value(message)
            .or_else(|| info.details().and_then(Self::extract_key_value));

        match (kind, constraint) {
            (DatabaseErrorKind::UniqueViolation, Some((entity, field))) => AppError::Duplicate {
                entity: entity.to_string(),
                field: field.to_string(),
                value: key_value
                    .map(|(_, value)| value)
                    .unwrap_or_else(|| "duplicate_value".to_string()),
            },
            (DatabaseErrorKind::ForeignKeyViolation, Some((entity, field))) => AppError::NotFound {
                entity: entity.to_string(),
                field: field.to_string(),
                value: key_value
                    .map(|(_, value)| value)
                    .unwrap_or_else(|| "unknown".to_string()),
            },
            (DatabaseErrorKind::CheckViolation, Some((entity, field))) => AppError::Validation {
                field: field.to_string(),
                reason: format!("Check constraint failed for {}", entity),
            },
            (DatabaseErrorKind::NotNullViolation, _) => AppError::Validation {
                field: info.column_name().unwrap_or("unknown").to_string(),
                reason: "Field is required".to_string(),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }

    /// Maps a constraint name from the migrations onto (entity, API field).
    pub fn describe_constraint(name: &str) -> Option<(&'static str, &'static str)> {
        match name {
            "users_username_key" => Some(("user", "username")),
            "users_email_key" => Some(("user", "email")),
            "cart_entries_user_id_costume_id_key" => Some(("cart entry", "costumeId")),
            "costumes_user_id_fkey" | "cart_entries_user_id_fkey" | "rentals_user_id_fkey" => {
                Some(("user", "userId"))
            }
            "cart_entries_costume_id_fkey" | "rentals_costume_id_fkey" => {
                Some(("costume", "costumeId"))
            }
            "costumes_rental_fee_check" => Some(("costume", "rentalFee")),
            "rentals_status_check" => Some(("rental", "status")),
            _ => None,
        }
    }

    /// Extracts `(column, value)` from a PostgreSQL `Key (column)=(value)` detail.
    pub fn extract_key_value(message: &str) -> Option<(String, String)> {
        let start = message.find("Key (")? + "Key (".len();
        let rest = &message[start..];
        let (columns, rest) = rest.split_once(")=(")?;
        let value_end = rest.find(')')?;
        Some((columns.to_string(), rest[..value_end].to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        column: Option<String>,
        constraint_name: Option<String>,
    }

    impl MockDatabaseErrorInfo {
        fn new(message: &str, constraint_name: Option<&str>) -> Self {
            Self {
                message: message.to_string(),
                details: None,
                column: None,
                constraint_name: constraint_name.map(String::from),
            }
        }
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            self.column.as_deref()
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_duplicate_cart_entry() {
        let mut info = MockDatabaseErrorInfo::new(
            "duplicate key value violates unique constraint \"cart_entries_user_id_costume_id_key\"",
            Some("cart_entries_user_id_costume_id_key"),
        );
        info.details = Some(
            "Key (user_id, costume_id)=(11111111-1111-1111-1111-111111111111, 22222222-2222-2222-2222-222222222222) already exists."
                .to_string(),
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "add cart entry") {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "cart entry");
                assert_eq!(field, "costumeId");
                assert!(value.contains("22222222"));
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_email() {
        let info = MockDatabaseErrorInfo::new(
            "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(test@example.com) already exists.",
            Some("users_email_key"),
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "user");
                assert_eq!(field, "email");
                assert_eq!(value, "test@example.com");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_violation_is_not_found() {
        let info = MockDatabaseErrorInfo::new(
            "insert or update on table \"cart_entries\" violates foreign key constraint \"cart_entries_costume_id_fkey\"\nDETAIL: Key (costume_id)=(abc) is not present in table \"costumes\".",
            Some("cart_entries_costume_id_fkey"),
        );
        let error =
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "add cart entry") {
            AppError::NotFound { entity, field, value } => {
                assert_eq!(entity, "costume");
                assert_eq!(field, "costumeId");
                assert_eq!(value, "abc");
            }
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn test_check_violation_on_fee() {
        let info = MockDatabaseErrorInfo::new(
            "new row for relation \"costumes\" violates check constraint \"costumes_rental_fee_check\"",
            Some("costumes_rental_fee_check"),
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "insert costume") {
            AppError::Validation { field, .. } => assert_eq!(field, "rentalFee"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_constraint_falls_back_to_database_error() {
        let info = MockDatabaseErrorInfo::new("boom", Some("something_else"));
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "x"),
            AppError::Database { .. }
        ));
    }

    #[test]
    fn test_extract_key_value() {
        assert_eq!(
            DatabaseErrorConverter::extract_key_value("Key (email)=(a@b.c) already exists."),
            Some(("email".to_string(), "a@b.c".to_string()))
        );
        assert_eq!(DatabaseErrorConverter::extract_key_value("no key here"), None);
    }
}
