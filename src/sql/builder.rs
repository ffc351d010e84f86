//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from entity and favorite descriptors.

use crate::model::{EntityDef, FavoriteDef, PK, USER_FK};
use serde_json::{Map, Value};

/// Alias of the join row id in favorite selects.
pub const FAVORITE_ID: &str = "favorite_id";

/// Quote identifier (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a bound value and return its numbered placeholder.
    fn push_param(&mut self, v: Value) -> String {
        self.params.push(v);
        format!("?{}", self.params.len())
    }
}

/// Primary key followed by every declared column, optionally prefixed with a table alias.
fn select_column_list(entity: &EntityDef, alias: Option<&str>) -> String {
    std::iter::once(PK)
        .chain(entity.columns.iter().map(|c| c.name))
        .map(|name| match alias {
            Some(a) => format!("{}.{}", a, quoted(name)),
            None => quoted(name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ordered by primary key.
pub fn select_list(entity: &EntityDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(entity, None),
        quoted(entity.table_name),
        quoted(PK)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(entity: &EntityDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(entity, None),
        quoted(entity.table_name),
        quoted(PK),
        ph
    );
    q
}

/// SELECT the lowest-id row whose column equals the value exactly.
pub fn select_first_by_column(entity: &EntityDef, column: &str, value: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(value.clone());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {} ORDER BY {} LIMIT 1",
        select_column_list(entity, None),
        quoted(entity.table_name),
        quoted(column),
        ph,
        quoted(PK)
    );
    q
}

pub fn count(table: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(table));
    q
}

/// INSERT every declared column; columns absent from the body are bound as NULL.
pub fn insert(entity: &EntityDef, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(entity.columns.len());
    let mut placeholders = Vec::with_capacity(entity.columns.len());
    for c in &entity.columns {
        let val = body.get(c.name).cloned().unwrap_or(Value::Null);
        placeholders.push(q.push_param(val));
        cols.push(quoted(c.name));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(entity.table_name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: SET only declared columns present in the body. None when the body touches no column.
pub fn update(entity: &EntityDef, id: i64, body: &Map<String, Value>) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in &entity.columns {
        let Some(v) = body.get(c.name) else { continue };
        let ph = q.push_param(v.clone());
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    if sets.is_empty() {
        return None;
    }
    let id_ph = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(entity.table_name),
        sets.join(", "),
        quoted(PK),
        id_ph
    );
    Some(q)
}

/// DELETE by id.
pub fn delete_by_id(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id));
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(table), quoted(PK), ph);
    q
}

/// Inner join of a favorite table with its target table for one user, in insertion order.
/// Rows carry the join row id as `favorite_id` followed by the target's columns.
pub fn select_favorites_for_user(favorite: &FavoriteDef, target: &EntityDef, user_id: i64) -> QueryBuf {
    const FAV_ALIAS: &str = "f";
    const TARGET_ALIAS: &str = "t";
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(user_id));
    q.sql = format!(
        "SELECT {fa}.{pk} AS {fid}, {cols} FROM {fav} {fa} INNER JOIN {target} {ta} ON {ta}.{pk} = {fa}.{tkey} WHERE {fa}.{ukey} = {ph} ORDER BY {fa}.{pk}",
        fa = FAV_ALIAS,
        ta = TARGET_ALIAS,
        pk = quoted(PK),
        fid = quoted(FAVORITE_ID),
        cols = select_column_list(target, Some(TARGET_ALIAS)),
        fav = quoted(favorite.table_name),
        target = quoted(target.table_name),
        tkey = quoted(&favorite.target_key),
        ukey = quoted(USER_FK),
        ph = ph,
    );
    q
}

pub fn insert_favorite(favorite: &FavoriteDef, user_id: i64, target_id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let user_ph = q.push_param(Value::from(user_id));
    let target_ph = q.push_param(Value::from(target_id));
    q.sql = format!(
        "INSERT INTO {} ({}, {}) VALUES ({}, {})",
        quoted(favorite.table_name),
        quoted(USER_FK),
        quoted(&favorite.target_key),
        user_ph,
        target_ph
    );
    q
}

/// SELECT the id of the oldest join row linking this user to this target.
pub fn select_first_favorite(favorite: &FavoriteDef, user_id: i64, target_id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let user_ph = q.push_param(Value::from(user_id));
    let target_ph = q.push_param(Value::from(target_id));
    q.sql = format!(
        "SELECT {pk} FROM {fav} WHERE {ukey} = {uph} AND {tkey} = {tph} ORDER BY {pk} LIMIT 1",
        pk = quoted(PK),
        fav = quoted(favorite.table_name),
        ukey = quoted(USER_FK),
        uph = user_ph,
        tkey = quoted(&favorite.target_key),
        tph = target_ph,
    );
    q
}
