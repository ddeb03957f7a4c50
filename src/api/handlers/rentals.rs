//! Checkout and rental history handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use super::parse_path_id;
use crate::api::doc::RENTALS_TAG;
use crate::api::dto::{ErrorResponse, RentalResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// Creates the rental routes
///
/// # Routes
/// - `GET /rentals`, `GET /rentals/{rentalId}` - Rental history
/// - `POST /rentals/{rentalId}/return` - Return a rented costume
/// - `GET /checkout` - Preview what checkout would create
/// - `POST /checkout` - Convert the cart into rentals
pub fn rental_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_rentals))
        .routes(routes!(get_rental))
        .routes(routes!(return_rental))
        .routes(routes!(preview_checkout, confirm_checkout))
}

/// Lists the caller's rentals
#[utoipa::path(
    get,
    path = "/rentals",
    tag = RENTALS_TAG,
    responses(
        (status = 200, description = "Rentals, newest first", body = Vec<RentalResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_rentals(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<RentalResponse>>> {
    let rentals = state.services.rentals.list_rentals(auth_user.user_id).await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

/// Gets one of the caller's rentals
#[utoipa::path(
    get,
    path = "/rentals/{rentalId}",
    tag = RENTALS_TAG,
    params(("rentalId" = String, Path, description = "Rental identifier")),
    responses(
        (status = 200, description = "The rental", body = RentalResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Rental not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_rental(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(rental_id): Path<String>,
) -> AppResult<Json<RentalResponse>> {
    let id = parse_path_id("rental", "rentalId", &rental_id)?;
    let rental = state
        .services
        .rentals
        .get_rental(auth_user.user_id, id)
        .await?;
    Ok(Json(rental.into()))
}

/// Marks a rental as returned
#[utoipa::path(
    post,
    path = "/rentals/{rentalId}/return",
    tag = RENTALS_TAG,
    params(("rentalId" = String, Path, description = "Rental identifier")),
    responses(
        (status = 200, description = "The returned rental", body = RentalResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Rental not found", body = ErrorResponse),
        (status = 409, description = "Rental already returned", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn return_rental(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(rental_id): Path<String>,
) -> AppResult<Json<RentalResponse>> {
    let id = parse_path_id("rental", "rentalId", &rental_id)?;
    let rental = state
        .services
        .rentals
        .return_rental(auth_user.user_id, id)
        .await?;
    Ok(Json(rental.into()))
}

/// Starts checkout: the rentals the cart would become, without storing them
#[utoipa::path(
    get,
    path = "/checkout",
    tag = RENTALS_TAG,
    responses(
        (status = 200, description = "Pending rentals for the current cart", body = Vec<RentalResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn preview_checkout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<RentalResponse>>> {
    let rentals = state
        .services
        .rentals
        .preview_checkout(auth_user.user_id)
        .await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::preview).collect()))
}

/// Confirms checkout: every cart entry becomes an active rental
#[utoipa::path(
    post,
    path = "/checkout",
    tag = RENTALS_TAG,
    responses(
        (status = 201, description = "Rentals created, cart emptied", body = Vec<RentalResponse>),
        (status = 400, description = "Cart is empty", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn confirm_checkout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<(StatusCode, Json<Vec<RentalResponse>>)> {
    let rentals = state.services.rentals.checkout(auth_user.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(rentals.into_iter().map(RentalResponse::from).collect()),
    ))
}
