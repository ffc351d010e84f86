//! Per-user favorites: join-table reads and writes resolved through the entity tables.

use crate::error::AppError;
use crate::model::{EntityDef, EntityKind, FavoriteDef, ResourceModel, PK};
use crate::service::crud::{execute, fetch_all, fetch_optional, row_to_json, CrudService};
use crate::sql::{self, FAVORITE_ID};
use serde_json::{Map, Value};
use sqlx::SqlitePool;

pub struct FavoriteService;

impl FavoriteService {
    /// One kind of favorite for a user, oldest first: `[{favorite_<kind>_id, <kind>_info}]`.
    /// Join rows whose target was deleted are skipped by the inner join.
    pub async fn list_kind(
        pool: &SqlitePool,
        model: &ResourceModel,
        favorite: &FavoriteDef,
        user_id: i64,
    ) -> Result<Vec<Value>, AppError> {
        let target = model.require(favorite.target)?;
        let q = sql::select_favorites_for_user(favorite, target, user_id);
        let rows = fetch_all(pool, &q).await?;
        Ok(rows
            .iter()
            .map(|r| favorite_item(favorite, row_to_json(r, target)))
            .collect())
    }

    /// The user's record plus one list per favorite kind.
    pub async fn bundle(
        pool: &SqlitePool,
        model: &ResourceModel,
        user: Value,
        user_id: i64,
    ) -> Result<Value, AppError> {
        let mut out = Map::new();
        out.insert("user".into(), user);
        for favorite in &model.favorites {
            let items = Self::list_kind(pool, model, favorite, user_id).await?;
            out.insert(favorite.list_key.into(), Value::Array(items));
        }
        Ok(Value::Object(out))
    }

    pub async fn list_for_user(pool: &SqlitePool, model: &ResourceModel, user_id: i64) -> Result<Value, AppError> {
        let users = model.require(EntityKind::User)?;
        let user = CrudService::require(pool, users, user_id).await?;
        Self::bundle(pool, model, user, user_id).await
    }

    /// One bundle per user, in user id order.
    pub async fn list_all(pool: &SqlitePool, model: &ResourceModel) -> Result<Vec<Value>, AppError> {
        let users = model.require(EntityKind::User)?;
        let mut out = Vec::new();
        for user in CrudService::list(pool, users).await? {
            let Some(user_id) = user.get(PK).and_then(Value::as_i64) else { continue };
            out.push(Self::bundle(pool, model, user, user_id).await?);
        }
        Ok(out)
    }

    /// Link the user to the first entity with this exact name. Repeats insert repeated rows.
    /// Returns the user's updated list for this kind.
    pub async fn add(
        pool: &SqlitePool,
        model: &ResourceModel,
        favorite: &FavoriteDef,
        user_id: i64,
        name: &Value,
    ) -> Result<Vec<Value>, AppError> {
        let target = model.require(favorite.target)?;
        let target_id = resolve_name(pool, target, name).await?;
        let q = sql::insert_favorite(favorite, user_id, target_id);
        execute(pool, &q).await?;
        tracing::info!(table = favorite.table_name, user_id, target_id, "favorite added");
        Self::list_kind(pool, model, favorite, user_id).await
    }

    /// Delete the oldest join row linking the user to the named entity.
    /// Returns the user's updated list for this kind.
    pub async fn remove(
        pool: &SqlitePool,
        model: &ResourceModel,
        favorite: &FavoriteDef,
        user_id: i64,
        name: &Value,
    ) -> Result<Vec<Value>, AppError> {
        use sqlx::Row;
        let target = model.require(favorite.target)?;
        let target_id = resolve_name(pool, target, name).await?;
        let q = sql::select_first_favorite(favorite, user_id, target_id);
        let row = fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::FavoriteNotFound { label: target.label })?;
        let favorite_id: i64 = row.try_get(0)?;
        execute(pool, &sql::delete_by_id(favorite.table_name, favorite_id)).await?;
        tracing::info!(table = favorite.table_name, user_id, target_id, favorite_id, "favorite removed");
        Self::list_kind(pool, model, favorite, user_id).await
    }
}

/// Id of the first entity (lowest id) whose name equals the value.
async fn resolve_name(pool: &SqlitePool, target: &EntityDef, name: &Value) -> Result<i64, AppError> {
    CrudService::find_first_by(pool, target, "name", name)
        .await?
        .and_then(|row| row.get(PK).and_then(Value::as_i64))
        .ok_or_else(|| AppError::NameNotFound {
            label: target.label,
            name: name.as_str().map_or_else(|| name.to_string(), str::to_string),
        })
}

fn favorite_item(favorite: &FavoriteDef, mut info: Value) -> Value {
    let favorite_id = info
        .as_object_mut()
        .and_then(|m| m.remove(FAVORITE_ID))
        .unwrap_or(Value::Null);
    let mut item = Map::new();
    item.insert(favorite.id_key.clone(), favorite_id);
    item.insert(favorite.info_key.clone(), info);
    Value::Object(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_splits_join_id_from_target() {
        let model = ResourceModel::builtin(true);
        let fav = model.favorite_by_path("planet").unwrap();
        let row = json!({ "favorite_id": 9, "id": 2, "name": "Hoth" });
        assert_eq!(
            favorite_item(fav, row),
            json!({ "favorite_planet_id": 9, "planet_info": { "id": 2, "name": "Hoth" } })
        );
    }
}
