//! Router assembly.

pub mod common;
pub mod entity;
pub mod favorite;

pub use common::common_routes;
pub use entity::entity_routes;
pub use favorite::favorite_routes;

use crate::response::error_body;
use crate::state::AppState;
use axum::{
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower::Layer;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, normalize_path::NormalizePath,
    normalize_path::NormalizePathLayer, trace::TraceLayer,
};

/// Request bodies above this size are refused.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(error_body("not found")))
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, Json(error_body("method not allowed")))
}

/// The body limit answers 413 on its own; give it the error envelope.
async fn payload_too_large(res: Response) -> Response {
    if res.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return (StatusCode::PAYLOAD_TOO_LARGE, Json(error_body("request body too large"))).into_response();
    }
    res
}

/// Every route of the service, with CORS, tracing and the body limit applied.
pub fn app(state: AppState) -> Router {
    let model = state.model.clone();
    Router::new()
        .merge(common_routes())
        .merge(favorite_routes(&model))
        .merge(entity_routes(&model))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(map_response(payload_too_large))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `app` behind trailing-slash trimming, which must run before routing.
pub fn http_service(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app(state))
}
