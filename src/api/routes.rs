//! Router configuration for the API.
//!
//! Handlers register themselves with `OpenApiRouter`, so the served OpenAPI
//! document is always derived from the routes actually mounted.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, error_response_middleware, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Routes reachable without a token.
fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::costumes::public_costume_routes())
        .merge(handlers::auth::auth_routes())
        .merge(handlers::health::health_routes())
}

/// Routes that sit behind `auth_middleware`.
fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(handlers::costumes::costume_routes())
        .merge(handlers::cart::cart_routes())
        .merge(handlers::rentals::rental_routes())
}

/// The complete OpenAPI document.
pub fn openapi() -> OpenApiDocument {
    let (_, mut doc) = public_routes().split_for_parts();
    let (_, protected) = protected_routes().split_for_parts();
    doc.merge(protected);
    doc
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID - generates/propagates request IDs
/// 2. Logging - one span per request, tagged with the request ID
/// 3. CORS and compression
/// 4. Error responses - normalizes error bodies and adds the request ID
/// 5. Auth - bearer routes only, runs before their handlers
pub fn create_router(state: AppState) -> Router {
    let (public, mut doc) = public_routes().split_for_parts();
    let (protected, protected_doc) = protected_routes().split_for_parts();
    doc.merge(protected_doc);

    let protected = protected.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, doc))
        .layer(middleware::from_fn(error_response_middleware))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
