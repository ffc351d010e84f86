//! Generic CRUD execution against SQLite.

use crate::error::AppError;
use crate::model::EntityDef;
use crate::sql::{self, BindValue, QueryBuf};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{Sqlite, SqlitePool};

pub struct CrudService;

impl CrudService {
    /// All rows ordered by id.
    pub async fn list(pool: &SqlitePool, entity: &EntityDef) -> Result<Vec<Value>, AppError> {
        let q = sql::select_list(entity);
        let rows = fetch_all(pool, &q).await?;
        Ok(rows.iter().map(|r| row_to_json(r, entity)).collect())
    }

    /// Fetch one row by primary key. Returns JSON object or None.
    pub async fn read(pool: &SqlitePool, entity: &EntityDef, id: i64) -> Result<Option<Value>, AppError> {
        let q = sql::select_by_id(entity, id);
        let row = fetch_optional(pool, &q).await?;
        Ok(row.map(|r| row_to_json(&r, entity)))
    }

    /// Like `read`, but a missing row is the entity's NotFound error.
    pub async fn require(pool: &SqlitePool, entity: &EntityDef, id: i64) -> Result<Value, AppError> {
        Self::read(pool, entity, id).await?.ok_or(AppError::NotFound {
            label: entity.label,
            id,
        })
    }

    /// First row (lowest id) whose column equals the value exactly.
    pub async fn find_first_by(
        pool: &SqlitePool,
        entity: &EntityDef,
        column: &str,
        value: &Value,
    ) -> Result<Option<Value>, AppError> {
        let q = sql::select_first_by_column(entity, column, value);
        let row = fetch_optional(pool, &q).await?;
        Ok(row.map(|r| row_to_json(&r, entity)))
    }

    /// Insert one row from the body after checking unique columns. Returns the new id.
    pub async fn create(pool: &SqlitePool, entity: &EntityDef, body: &Map<String, Value>) -> Result<i64, AppError> {
        for c in entity.unique_columns() {
            let Some(v) = body.get(c.name).filter(|v| !v.is_null()) else { continue };
            if Self::find_first_by(pool, entity, c.name, v).await?.is_some() {
                return Err(AppError::DuplicateUnique { field: c.name });
            }
        }
        let q = sql::insert(entity, body);
        let result = execute(pool, &q).await.map_err(|e| unique_violation(entity, e))?;
        let id = result.last_insert_rowid();
        tracing::info!(table = entity.table_name, id, "created");
        Ok(id)
    }

    /// Overwrite the columns present in the body; absent columns are left untouched.
    pub async fn update(
        pool: &SqlitePool,
        entity: &EntityDef,
        id: i64,
        body: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let Some(q) = sql::update(entity, id, body) else {
            return Ok(());
        };
        let result = execute(pool, &q).await.map_err(|e| unique_violation(entity, e))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                label: entity.label,
                id,
            });
        }
        tracing::info!(table = entity.table_name, id, "updated");
        Ok(())
    }

    /// Delete one row by id. Favorite rows pointing at it are left in place.
    pub async fn delete(pool: &SqlitePool, entity: &EntityDef, id: i64) -> Result<(), AppError> {
        let q = sql::delete_by_id(entity.table_name, id);
        let result = execute(pool, &q).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                label: entity.label,
                id,
            });
        }
        tracing::info!(table = entity.table_name, id, "deleted");
        Ok(())
    }

    pub async fn count(pool: &SqlitePool, table: &str) -> Result<i64, AppError> {
        let q = sql::count(table);
        tracing::debug!(sql = %q.sql, "query");
        let n = sqlx::query_scalar::<Sqlite, i64>(&q.sql).fetch_one(pool).await?;
        Ok(n)
    }
}

fn prepare(q: &QueryBuf) -> sqlx::query::Query<'_, Sqlite, SqliteArguments<'_>> {
    tracing::debug!(sql = %q.sql, params = q.params.len(), "query");
    q.params
        .iter()
        .fold(sqlx::query(&q.sql), |query, p| query.bind(BindValue::from_json(p)))
}

pub(crate) async fn fetch_all(pool: &SqlitePool, q: &QueryBuf) -> Result<Vec<SqliteRow>, AppError> {
    Ok(prepare(q).fetch_all(pool).await?)
}

pub(crate) async fn fetch_optional(pool: &SqlitePool, q: &QueryBuf) -> Result<Option<SqliteRow>, AppError> {
    Ok(prepare(q).fetch_optional(pool).await?)
}

pub(crate) async fn execute(pool: &SqlitePool, q: &QueryBuf) -> Result<SqliteQueryResult, sqlx::Error> {
    prepare(q).execute(pool).await
}

/// Map a store-level unique violation to the column it names.
fn unique_violation(entity: &EntityDef, e: sqlx::Error) -> AppError {
    let violated = e
        .as_database_error()
        .filter(|db| db.is_unique_violation())
        .map(|db| db.message().to_string());
    match violated {
        Some(message) => {
            let field = entity
                .unique_columns()
                .find(|c| message.contains(&format!("{}.{}", entity.table_name, c.name)))
                .or_else(|| entity.unique_columns().next())
                .map(|c| c.name)
                .unwrap_or("value");
            AppError::DuplicateUnique { field }
        }
        None => AppError::Db(e),
    }
}

/// Row as a JSON object keyed by column name, minus the entity's sensitive columns.
pub(crate) fn row_to_json(row: &SqliteRow, entity: &EntityDef) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = Map::new();
    for col in row.columns() {
        let name = col.name();
        if entity.sensitive_columns.contains(name) {
            continue;
        }
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

/// Decode by the stored value's runtime class: integer, real, then text.
fn cell_to_value(row: &SqliteRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
