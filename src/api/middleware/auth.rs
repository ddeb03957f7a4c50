//! JWT authentication middleware.
//!
//! Validates bearer access tokens and exposes the caller as `AuthUser`.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated caller, inserted into request extensions.
///
/// Extract it in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            username: claims.username,
        })
    }
}

/// JWT authentication middleware
///
/// # Headers
/// Expects: `Authorization: Bearer <token>`
///
/// # Errors
/// Returns 401 Unauthorized if the header is missing or malformed, or the
/// token is invalid, expired or a refresh token. The wrapped handler does
/// not run in that case.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
    })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;
    tracing::Span::current().record("user_id", tracing::field::display(auth_user.user_id));
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            username: "testuser".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_auth_user_from_claims() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser::try_from(claims(&id.to_string())).unwrap();
        assert_eq!(auth_user.user_id, id);
        assert_eq!(auth_user.email, "test@example.com");
        assert_eq!(auth_user.username, "testuser");
    }

    #[test]
    fn test_auth_user_rejects_bad_subject() {
        assert!(matches!(
            AuthUser::try_from(claims("123")),
            Err(AppError::Unauthorized { .. })
        ));
    }
}
