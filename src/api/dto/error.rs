//! Error response DTOs.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Standard error response format.
///
/// Every non-2xx response from the API carries this body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "costume with costumeId=3f0e4a4e-8d7c-4d59-bb47-4c2b0b2b7a11 not found",
    "requestId": "0b6f2a4c-3c1d-4c2e-9f0a-1d2e3f4a5b6c"
}))]
pub struct ErrorResponse {
    /// Machine readable error code
    pub code: String,
    /// Human readable message
    pub message: String,
    /// Structured extra information, e.g. failed fields
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    /// Correlation id echoed from the `x-request-id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
            request_id: None,
        }
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} with {}={} not found", entity, field, value))
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            format!("{} with {}={} already exists", entity, field, value),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", format!("{}: {}", field, reason))
            .with_details(serde_json::json!([{ "field": field, "message": reason }]))
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
