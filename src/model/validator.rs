//! Model validation: referential integrity and API consistency.

use crate::error::ConfigError;
use crate::model::ResourceModel;
use std::collections::HashSet;

pub fn validate(model: &ResourceModel) -> Result<(), ConfigError> {
    let mut path_segments = HashSet::new();
    for e in &model.entities {
        if e.column("name").is_none() {
            return Err(ConfigError::MissingNameColumn(e.table_name));
        }
        if !path_segments.insert(e.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(e.path_segment.to_string()));
        }
    }

    let mut favorite_segments = HashSet::new();
    for f in &model.favorites {
        if model.entity(f.target).is_none() {
            return Err(ConfigError::MissingReference {
                kind: "entity",
                id: format!("{:?}", f.target),
            });
        }
        if !favorite_segments.insert(f.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(f.path_segment.to_string()));
        }
    }

    Ok(())
}
