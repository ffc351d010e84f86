//! The served resources: users, planets, vehicles, characters and their favorite join tables.

use crate::model::resolved::{ColumnDef, EntityDef, EntityKind, FavoriteDef, ResourceModel};
use std::collections::HashSet;

const USER_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("name").not_null().required(),
    ColumnDef::text("country"),
    ColumnDef::text("birthday"),
    ColumnDef::text("email").unique().required(),
    ColumnDef::text("password"),
];

const PLANET_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("name").required(),
    ColumnDef::integer("diameter"),
    ColumnDef::integer("rotation_period"),
    ColumnDef::integer("orbital_period"),
    ColumnDef::integer("population"),
    ColumnDef::integer("surface_water"),
    ColumnDef::text("climate"),
    ColumnDef::text("terrain"),
];

const VEHICLE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("name").required(),
    ColumnDef::text("model"),
    ColumnDef::text("vehicle_class"),
    ColumnDef::text("manufacturer"),
    ColumnDef::text("consumables"),
    ColumnDef::integer("cost_in_credits"),
    ColumnDef::integer("crew"),
    ColumnDef::real("length"),
    ColumnDef::integer("max_atmosphering_speed"),
    ColumnDef::integer("cargo_capacity"),
];

const CHARACTER_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("name").required(),
    ColumnDef::text("gender"),
    ColumnDef::integer("height"),
    ColumnDef::integer("mass"),
    ColumnDef::text("hair_color"),
    ColumnDef::text("eye_color"),
    ColumnDef::text("birth_year"),
];

fn entity(
    kind: EntityKind,
    table_name: &'static str,
    label: &'static str,
    columns: &[ColumnDef],
    sensitive: &[&'static str],
) -> EntityDef {
    EntityDef {
        kind,
        table_name,
        path_segment: table_name,
        label,
        columns: columns.to_vec(),
        sensitive_columns: sensitive.iter().copied().collect::<HashSet<_>>(),
    }
}

impl ResourceModel {
    /// Build the served model. With `expose_sensitive` off, user passwords never leave the store.
    pub fn builtin(expose_sensitive: bool) -> Self {
        let user_sensitive: &[&'static str] = if expose_sensitive { &[] } else { &["password"] };
        ResourceModel {
            entities: vec![
                entity(EntityKind::User, "users", "user", USER_COLUMNS, user_sensitive),
                entity(EntityKind::Planet, "planets", "planet", PLANET_COLUMNS, &[]),
                entity(EntityKind::Vehicle, "vehicles", "vehicle", VEHICLE_COLUMNS, &[]),
                entity(EntityKind::Character, "characters", "character", CHARACTER_COLUMNS, &[]),
            ],
            favorites: vec![
                FavoriteDef::new("favorite_characters", "character", "characters", EntityKind::Character),
                FavoriteDef::new("favorite_planets", "planet", "planets", EntityKind::Planet),
                FavoriteDef::new("favorite_vehicles", "vehicle", "vehicles", EntityKind::Vehicle),
            ],
        }
    }
}
