//! Favorites handlers under `/users`.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::model::{EntityKind, FavoriteDef};
use crate::response::{ok_info, OK};
use crate::service::{CrudService, FavoriteService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::{json, Value};

/// Path segment of the favorite kind a route serves, e.g. `character`.
#[derive(Clone, Copy, Debug)]
pub struct FavoriteKind(pub &'static str);

fn favorite_def(state: &AppState, kind: FavoriteKind) -> Result<&FavoriteDef, AppError> {
    state
        .model
        .favorite_by_path(kind.0)
        .ok_or_else(|| AppError::BadRequest(format!("unknown favorite kind {}", kind.0)))
}

/// GET /users/favorites
pub async fn list_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bundles = FavoriteService::list_all(&state.pool, &state.model).await?;
    Ok(ok_info(bundles))
}

/// GET /users/:id/favorites
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_id(&id_str)?;
    let bundle = FavoriteService::list_for_user(&state.pool, &state.model, user_id).await?;
    Ok(ok_info(bundle))
}

/// POST /users/:id/favorites/:kind with `{"<kind>_name": ...}`
pub async fn add(
    State(state): State<AppState>,
    Extension(kind): Extension<FavoriteKind>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let favorite = favorite_def(&state, kind)?;
    let target = state.entity(favorite.target)?;
    let users = state.entity(EntityKind::User)?;
    let user_id = parse_id(&id_str)?;
    CrudService::require(&state.pool, users, user_id).await?;
    let body = RequestValidator::require_body(body)?;
    let name = RequestValidator::require_name(&body, &favorite.name_key, target.label)?;
    let items = FavoriteService::add(&state.pool, &state.model, favorite, user_id, name).await?;
    Ok(ok_info(items))
}

/// DELETE /users/:id/favorites/:kind with `{"<kind>_name": ...}`
pub async fn remove(
    State(state): State<AppState>,
    Extension(kind): Extension<FavoriteKind>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let favorite = favorite_def(&state, kind)?;
    let target = state.entity(favorite.target)?;
    let users = state.entity(EntityKind::User)?;
    let user_id = parse_id(&id_str)?;
    let user = CrudService::require(&state.pool, users, user_id).await?;
    let body = RequestValidator::require_body(body)?;
    let name = RequestValidator::require_name(&body, &favorite.name_key, target.label)?;
    let items = FavoriteService::remove(&state.pool, &state.model, favorite, user_id, name).await?;
    let user_name = user.get("name").cloned().unwrap_or(Value::Null);
    Ok(Json(json!({ "msg": OK, "user_name": user_name, "info": items })))
}
