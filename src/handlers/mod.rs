//! HTTP handlers for entity CRUD, favorites and the sitemap.

pub mod entity;
pub mod favorite;
pub mod sitemap;

use crate::error::AppError;

/// Path ids are integers; anything else is rejected before touching the store.
pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}
