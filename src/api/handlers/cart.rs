//! Cart handlers: list, add, cancel.

use axum::{Extension, Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use super::parse_body_id;
use crate::api::doc::RENTALS_TAG;
use crate::api::dto::{CancelRentalRequest, CartRequest, CostumeResponse, ErrorResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the cart routes
///
/// # Routes
/// - `GET /cart` - Costumes in the caller's cart
/// - `POST /cart` - Add a costume
/// - `DELETE /cancel-rental` - Remove a costume
pub fn cart_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_cart, add_to_cart))
        .routes(routes!(cancel_rental))
}

/// Lists the caller's cart
#[utoipa::path(
    get,
    path = "/cart",
    tag = RENTALS_TAG,
    responses(
        (status = 200, description = "Costumes in the cart, oldest first", body = Vec<CostumeResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_cart(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<CostumeResponse>>> {
    let costumes = state.services.cart.list_cart(auth_user.user_id).await?;
    Ok(Json(costumes.into_iter().map(CostumeResponse::from).collect()))
}

/// Adds a costume to the cart
#[utoipa::path(
    post,
    path = "/cart",
    tag = RENTALS_TAG,
    request_body = CartRequest,
    responses(
        (status = 200, description = "The costume added", body = CostumeResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "userId is not the caller", body = ErrorResponse),
        (status = 404, description = "Costume not found", body = ErrorResponse),
        (status = 409, description = "Costume already in the cart", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn add_to_cart(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CartRequest>,
) -> AppResult<Json<CostumeResponse>> {
    let costume_id = parse_body_id("costumeId", &payload.costume_id)?;
    let owner = parse_body_id("userId", &payload.user_id)?;

    let costume = state
        .services
        .cart
        .add_to_cart(auth_user.user_id, owner, costume_id)
        .await?;
    Ok(Json(costume.into()))
}

/// Removes a costume from the cart
#[utoipa::path(
    delete,
    path = "/cancel-rental",
    tag = RENTALS_TAG,
    request_body = CancelRentalRequest,
    responses(
        (status = 200, description = "The costume removed", body = CostumeResponse),
        (status = 400, description = "Missing or malformed costumeId", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Costume not in the cart", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn cancel_rental(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CancelRentalRequest>,
) -> AppResult<Json<CostumeResponse>> {
    let costume_id = parse_body_id("costumeId", &payload.costume_id)?;
    let costume = state
        .services
        .cart
        .cancel(auth_user.user_id, costume_id)
        .await?;
    Ok(Json(costume.into()))
}
