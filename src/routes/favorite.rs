//! Favorites routes under the users path: listings plus add/remove per favorite kind.

use crate::handlers::favorite::{add, list_all, list_for_user, remove, FavoriteKind};
use crate::model::{EntityKind, ResourceModel};
use crate::state::AppState;
use axum::{routing::get, routing::post, Extension, Router};

pub fn favorite_routes(model: &ResourceModel) -> Router<AppState> {
    let Some(users) = model.entity(EntityKind::User) else {
        return Router::new();
    };
    let base = users.path_segment;
    let router = Router::new()
        .route(&format!("/{base}/favorites"), get(list_all))
        .route(&format!("/{base}/:id/favorites"), get(list_for_user));
    model.favorites.iter().fold(router, |router, favorite| {
        router.route(
            &format!("/{base}/:id/favorites/{}", favorite.path_segment),
            post(add)
                .delete(remove)
                .layer(Extension(FavoriteKind(favorite.path_segment))),
        )
    })
}
