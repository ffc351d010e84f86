//! Shared application state for all routes.

use crate::error::AppError;
use crate::model::{EntityDef, EntityKind, ResourceModel};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub model: Arc<ResourceModel>,
}

impl AppState {
    pub fn new(pool: SqlitePool, model: ResourceModel) -> Self {
        AppState {
            pool,
            model: Arc::new(model),
        }
    }

    pub fn entity(&self, kind: EntityKind) -> Result<&EntityDef, AppError> {
        Ok(self.model.require(kind)?)
    }
}
