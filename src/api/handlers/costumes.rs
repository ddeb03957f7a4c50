//! Costume catalogue handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use super::parse_path_id;
use crate::api::doc::RENTALS_TAG;
use crate::api::dto::{CostumeResponse, CreateCostumeRequest, ErrorResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Routes readable without a token
pub fn public_costume_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_costumes))
        .routes(routes!(get_costume))
}

/// Routes that require a bearer token
pub fn costume_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(create_costume))
}

/// Lists every costume
#[utoipa::path(
    get,
    path = "/costumes",
    tag = RENTALS_TAG,
    responses(
        (status = 200, description = "All costumes, ordered by name", body = Vec<CostumeResponse>)
    )
)]
async fn list_costumes(State(state): State<AppState>) -> AppResult<Json<Vec<CostumeResponse>>> {
    let costumes = state.services.costumes.list_costumes().await?;
    Ok(Json(costumes.into_iter().map(CostumeResponse::from).collect()))
}

/// Gets one costume
#[utoipa::path(
    get,
    path = "/costumes/{costumeId}",
    tag = RENTALS_TAG,
    params(("costumeId" = String, Path, description = "Costume identifier")),
    responses(
        (status = 200, description = "The costume", body = CostumeResponse),
        (status = 404, description = "Costume not found", body = ErrorResponse)
    )
)]
async fn get_costume(
    State(state): State<AppState>,
    Path(costume_id): Path<String>,
) -> AppResult<Json<CostumeResponse>> {
    let id = parse_path_id("costume", "costumeId", &costume_id)?;
    let costume = state.services.costumes.get_costume(id).await?;
    Ok(Json(costume.into()))
}

/// Lists a new costume owned by the caller
#[utoipa::path(
    post,
    path = "/costumes",
    tag = RENTALS_TAG,
    request_body = CreateCostumeRequest,
    responses(
        (status = 201, description = "Costume listed", body = CostumeResponse),
        (status = 400, description = "Invalid costume data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_costume(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateCostumeRequest>,
) -> AppResult<(StatusCode, Json<CostumeResponse>)> {
    let new_costume = payload.into_new_costume(auth_user.user_id)?;
    let costume = state.services.costumes.create_costume(new_costume).await?;
    Ok((StatusCode::CREATED, Json(costume.into())))
}
