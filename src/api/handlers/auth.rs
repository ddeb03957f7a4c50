//! Authentication handlers for registration, login and token refresh.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    AuthResponse, ErrorResponse, LoginRequest, RefreshTokenRequest, RefreshTokenResponse,
    RegisterRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::state::AppState;
use crate::utils::jwt::{generate_token_pair, validate_refresh_token};
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /auth/login` - Authenticate user and get tokens
/// - `POST /auth/register` - Register new user and get tokens
/// - `POST /auth/refresh` - Exchange a refresh token for a new pair
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(register))
        .routes(routes!(refresh_token))
}

fn issue_tokens(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let pair = generate_token_pair(user.id, &user.email, &user.username, &state.jwt_config)?;
    Ok(AuthResponse {
        user: user.into(),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    })
}

/// Authenticates with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .services
        .users
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(issue_tokens(&state, user)?))
}

/// Creates an account and logs it in
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let user = state
        .services
        .users
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(issue_tokens(&state, user)?)))
}

/// Exchanges a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed successfully", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    )
)]
async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<RefreshTokenResponse>> {
    let claims = validate_refresh_token(&payload.refresh_token, &state.jwt_config.secret)?;

    // The account may have been removed since the token was issued
    let user = state
        .services
        .users
        .get_user(claims.user_id()?)
        .await
        .map_err(|e| match e {
            AppError::NotFound { .. } => AppError::unauthorized("User no longer exists"),
            other => other,
        })?;

    let issued = issue_tokens(&state, user)?;
    Ok(Json(RefreshTokenResponse {
        access_token: issued.access_token,
        refresh_token: issued.refresh_token,
    }))
}
