//! Apply the resource model to the database: entity tables, favorite join tables and their indexes.
//! Every statement is idempotent, so this runs on each startup.

use crate::error::AppError;
use crate::model::{validate, EntityDef, FavoriteDef, ResourceModel, PK, USER_FK};
use sqlx::SqlitePool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Validate the model, then CREATE TABLE / CREATE INDEX IF NOT EXISTS for everything it declares.
pub async fn apply_migrations(pool: &SqlitePool, model: &ResourceModel) -> Result<(), AppError> {
    validate(model)?;

    for entity in &model.entities {
        let sql = create_entity_table(entity);
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }

    for favorite in &model.favorites {
        for sql in [create_favorite_table(favorite), create_favorite_index(favorite)] {
            tracing::debug!(sql = %sql, "migration");
            sqlx::query(&sql).execute(pool).await?;
        }
    }

    tracing::info!(
        entities = model.entities.len(),
        favorites = model.favorites.len(),
        "migrations applied"
    );
    Ok(())
}

pub fn create_entity_table(entity: &EntityDef) -> String {
    let mut col_defs = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote(PK))];
    for c in &entity.columns {
        let mut def = format!("{} {}", quote(c.name), c.sql_type.ddl());
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        if c.unique {
            def.push_str(" UNIQUE");
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quote(entity.table_name),
        col_defs.join(",\n  ")
    )
}

/// Join table without foreign-key or uniqueness constraints: duplicate rows are allowed and
/// rows outlive the user or entity they point at.
pub fn create_favorite_table(favorite: &FavoriteDef) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {} INTEGER PRIMARY KEY AUTOINCREMENT,\n  {} INTEGER,\n  {} INTEGER\n)",
        quote(favorite.table_name),
        quote(PK),
        quote(USER_FK),
        quote(&favorite.target_key)
    )
}

pub fn create_favorite_index(favorite: &FavoriteDef) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        quote(&format!("{}_{}_idx", favorite.table_name, USER_FK)),
        quote(favorite.table_name),
        quote(USER_FK)
    )
}
