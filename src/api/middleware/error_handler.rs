//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaves the API as an `ErrorResponse` body. Handlers return
//! `AppError`; `error_response_middleware` stamps the request id on those
//! bodies and rewrites axum's own plain-text rejections (unknown route,
//! wrong method) into the same shape.

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Conflict { .. } => StatusCode::CONFLICT,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the client-facing body. Server-side causes are never included.
fn error_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::duplicate_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                .with_details(json!(errors))
        }
        AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message.as_str()),
        AppError::Unauthorized { message } => {
            ErrorResponse::new("UNAUTHORIZED", message.as_str())
        }
        AppError::Forbidden { message } => ErrorResponse::new("FORBIDDEN", message.as_str()),
        AppError::Conflict { message } => ErrorResponse::new("CONFLICT", message.as_str()),
        AppError::Database { operation, .. } => ErrorResponse::new(
            "DATABASE_ERROR",
            format!("Database operation failed: {}", operation),
        ),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new("CONFIGURATION_ERROR", format!("Configuration error: {}", key))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
        }
        AppError::Internal { .. } => {
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = error_body(&self);
        let mut response = (status, Json(body.clone())).into_response();
        // Picked up by `error_response_middleware` to add the request id
        response.extensions_mut().insert(body);
        response
    }
}

/// Normalizes every error response into an `ErrorResponse` carrying the
/// request id.
pub async fn error_response_middleware(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let body = match response.extensions().get::<ErrorResponse>() {
        Some(body) => body.clone(),
        None => fallback_body(status),
    };
    let body = match request_id {
        Some(id) => body.with_request_id(id),
        None => body,
    };

    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(_) => return response,
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(bytes))
}

/// Body for error responses that did not come from an `AppError`.
fn fallback_body(status: StatusCode) -> ErrorResponse {
    match status {
        StatusCode::NOT_FOUND => {
            ErrorResponse::new("NOT_FOUND", "The requested resource was not found")
        }
        StatusCode::METHOD_NOT_ALLOWED => ErrorResponse::new(
            "METHOD_NOT_ALLOWED",
            "HTTP method not allowed for this endpoint",
        ),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            ErrorResponse::new("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type")
        }
        StatusCode::PAYLOAD_TOO_LARGE => {
            ErrorResponse::new("PAYLOAD_TOO_LARGE", "Request payload too large")
        }
        s if s.is_client_error() => {
            ErrorResponse::new("BAD_REQUEST", "Bad request - invalid or malformed request")
        }
        _ => ErrorResponse::new("INTERNAL_SERVER_ERROR", "An internal server error occurred"),
    }
}
