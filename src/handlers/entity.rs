//! Entity CRUD handlers: list, read, create, update, delete.
//! The entity comes from an `Extension<EntityKind>` attached to each route.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::model::EntityKind;
use crate::response::{ok, ok_info};
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
) -> Result<impl IntoResponse, AppError> {
    let entity = state.entity(kind)?;
    let rows = CrudService::list(&state.pool, entity).await?;
    Ok(ok_info(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entity = state.entity(kind)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::require(&state.pool, entity, id).await?;
    Ok(ok_info(row))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let entity = state.entity(kind)?;
    let body = RequestValidator::require_body(body)?;
    RequestValidator::validate_create(&body, entity)?;
    CrudService::create(&state.pool, entity, &body).await?;
    Ok(ok())
}

pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let entity = state.entity(kind)?;
    let id = parse_id(&id_str)?;
    CrudService::require(&state.pool, entity, id).await?;
    let body = RequestValidator::require_body(body)?;
    RequestValidator::validate_update(&body, entity)?;
    CrudService::update(&state.pool, entity, id, &body).await?;
    Ok(ok())
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<EntityKind>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entity = state.entity(kind)?;
    let id = parse_id(&id_str)?;
    CrudService::delete(&state.pool, entity, id).await?;
    Ok(ok())
}
