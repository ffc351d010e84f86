//! Entity CRUD routes built from the resource model: `/{segment}` and `/{segment}/:id` per entity.

use crate::handlers::entity::{create, delete, list, read, update};
use crate::model::ResourceModel;
use crate::state::AppState;
use axum::{routing::get, Extension, Router};

pub fn entity_routes(model: &ResourceModel) -> Router<AppState> {
    model.entities.iter().fold(Router::new(), |router, entity| {
        let kind = entity.kind;
        router
            .route(
                &format!("/{}", entity.path_segment),
                get(list).post(create).layer(Extension(kind)),
            )
            .route(
                &format!("/{}/:id", entity.path_segment),
                get(read).put(update).delete(delete).layer(Extension(kind)),
            )
    })
}
