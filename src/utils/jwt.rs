use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Accepted on resource routes (short-lived)
    Access,
    /// Only accepted by `/auth/refresh` (long-lived)
    Refresh,
}

/// JWT claims carried by both token types
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,
    pub email: String,
    pub username: String,
    pub token_type: TokenType,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: Uuid,
        email: &str,
        username: &str,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            token_type,
            iat: now,
            exp: now + expiration_hours * 3600,
        }
    }

    /// The subject as a user id.
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }
}

/// An access/refresh token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs a token (HS256).
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    username: &str,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, username, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Issues both tokens with the lifetimes from `config`.
pub fn generate_token_pair(
    user_id: Uuid,
    email: &str,
    username: &str,
    config: &JwtConfig,
) -> AppResult<TokenPair> {
    Ok(TokenPair {
        access_token: generate_token(
            user_id,
            email,
            username,
            TokenType::Access,
            &config.secret,
            config.access_token_expiration,
        )?,
        refresh_token: generate_token(
            user_id,
            email,
            username,
            TokenType::Refresh,
            &config.secret,
            config.refresh_token_expiration,
        )?,
    })
}

/// Validates signature and expiry, and the token type when one is expected.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Invalid token signature")
        }
        _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::unauthorized(format!(
            "Invalid token type: expected {:?}, got {:?}",
            expected, claims.token_type
        )));
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing_0123456789";

    fn config() -> JwtConfig {
        JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiration: 1,
            refresh_token_expiration: 168,
        }
    }

    fn user_id() -> Uuid {
        Uuid::parse_str("6f1c1b8e-3a8e-4b8f-9a51-6a1a2f0f7e10").unwrap()
    }

    #[test]
    fn test_token_pair_round_trip() {
        let pair = generate_token_pair(user_id(), "frodo@shire.me", "frodo", &config()).unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = validate_access_token(&pair.access_token, TEST_SECRET).unwrap();
        assert_eq!(access.user_id().unwrap(), user_id());
        assert_eq!(access.username, "frodo");
        assert_eq!(access.email, "frodo@shire.me");
        assert_eq!(access.token_type, TokenType::Access);

        let refresh = validate_refresh_token(&pair.refresh_token, TEST_SECRET).unwrap();
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let pair = generate_token_pair(user_id(), "a@b.c", "frodo", &config()).unwrap();

        match validate_access_token(&pair.refresh_token, TEST_SECRET) {
            Err(AppError::Unauthorized { message }) => {
                assert!(message.contains("Invalid token type"))
            }
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret() {
        let token = generate_token(user_id(), "a@b.c", "frodo", TokenType::Access, TEST_SECRET, 1)
            .unwrap();

        match validate_token(&token, "another_secret_key_that_is_long_enough", None) {
            Err(AppError::Unauthorized { message }) => assert!(message.contains("signature")),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_token() {
        // Well past the default 60s leeway
        let token = generate_token(user_id(), "a@b.c", "frodo", TokenType::Access, TEST_SECRET, -1)
            .unwrap();

        match validate_token(&token, TEST_SECRET, None) {
            Err(AppError::Unauthorized { message }) => assert!(message.contains("expired")),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            validate_token("invalid.token.format", TEST_SECRET, None),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_non_uuid_subject() {
        let mut claims = Claims::new(user_id(), "a@b.c", "frodo", TokenType::Access, 1);
        claims.sub = "42".to_string();
        assert!(matches!(claims.user_id(), Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_token_type_serialization() {
        let claims = Claims::new(user_id(), "a@b.c", "frodo", TokenType::Refresh, 1);
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"refresh\""));
    }
}
