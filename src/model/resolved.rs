//! Resolved resource model: entity tables and favorite join tables, flattened for runtime use.

use crate::error::ConfigError;
use std::collections::HashSet;

/// Surrogate primary key shared by every table.
pub const PK: &str = "id";

/// Column every favorite join table uses to point at its owner.
pub const USER_FK: &str = "user_id";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Planet,
    Vehicle,
    Character,
}

/// Storage class of a column. Values are never coerced by the API; the store applies its own affinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Real,
    Text,
}

impl SqlType {
    pub fn ddl(self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    /// Must be present in a create body.
    pub required: bool,
    pub unique: bool,
}

impl ColumnDef {
    const fn new(name: &'static str, sql_type: SqlType) -> Self {
        ColumnDef {
            name,
            sql_type,
            nullable: true,
            required: false,
            unique: false,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, SqlType::Text)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, SqlType::Integer)
    }

    pub const fn real(name: &'static str) -> Self {
        Self::new(name, SqlType::Real)
    }

    pub const fn required(self) -> Self {
        ColumnDef { required: true, ..self }
    }

    pub const fn not_null(self) -> Self {
        ColumnDef { nullable: false, ..self }
    }

    pub const fn unique(self) -> Self {
        ColumnDef { unique: true, ..self }
    }
}

#[derive(Clone, Debug)]
pub struct EntityDef {
    pub kind: EntityKind,
    pub table_name: &'static str,
    pub path_segment: &'static str,
    /// Singular noun used in error messages ("user", "planet", ...).
    pub label: &'static str,
    /// Mutable columns, in serialization order. The primary key is implicit.
    pub columns: Vec<ColumnDef>,
    /// Column names stripped from every API response.
    pub sensitive_columns: HashSet<&'static str>,
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.required)
    }

    pub fn unique_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.unique)
    }
}

/// One favorite join table: rows link a user to one entity of `target`.
#[derive(Clone, Debug)]
pub struct FavoriteDef {
    pub table_name: &'static str,
    /// Last path segment of `/users/:id/favorites/:kind`.
    pub path_segment: &'static str,
    pub target: EntityKind,
    /// Join column holding the target's id, e.g. `character_id`.
    pub target_key: String,
    /// Body key naming the target on add and remove, e.g. `character_name`.
    pub name_key: String,
    /// Key of this kind's list in a favorites bundle, e.g. `characters`.
    pub list_key: &'static str,
    /// Per-item key holding the join row id, e.g. `favorite_character_id`.
    pub id_key: String,
    /// Per-item key holding the serialized target, e.g. `character_info`.
    pub info_key: String,
}

impl FavoriteDef {
    pub fn new(table_name: &'static str, path_segment: &'static str, list_key: &'static str, target: EntityKind) -> Self {
        FavoriteDef {
            table_name,
            path_segment,
            target,
            target_key: format!("{}_id", path_segment),
            name_key: format!("{}_name", path_segment),
            list_key,
            id_key: format!("favorite_{}_id", path_segment),
            info_key: format!("{}_info", path_segment),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResourceModel {
    pub entities: Vec<EntityDef>,
    pub favorites: Vec<FavoriteDef>,
}

impl ResourceModel {
    pub fn entity(&self, kind: EntityKind) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.kind == kind)
    }

    pub fn require(&self, kind: EntityKind) -> Result<&EntityDef, ConfigError> {
        self.entity(kind).ok_or_else(|| ConfigError::MissingReference {
            kind: "entity",
            id: format!("{:?}", kind),
        })
    }

    pub fn favorite_by_path(&self, path: &str) -> Option<&FavoriteDef> {
        self.favorites.iter().find(|f| f.path_segment == path)
    }
}
