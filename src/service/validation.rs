//! Request presence checks. Values are never type-checked.

use crate::error::AppError;
use crate::model::EntityDef;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// The body itself must be present.
    pub fn require_body(body: Option<Map<String, Value>>) -> Result<Map<String, Value>, AppError> {
        body.ok_or(AppError::MissingBody)
    }

    /// Every required column must be present and non-null, checked in column order.
    pub fn validate_create(body: &Map<String, Value>, entity: &EntityDef) -> Result<(), AppError> {
        for c in entity.required_columns() {
            if body.get(c.name).map_or(true, Value::is_null) {
                return Err(AppError::MissingField {
                    label: entity.label,
                    field: c.name,
                });
            }
        }
        Ok(())
    }

    /// An update may omit any column, but may not null out a non-nullable one.
    pub fn validate_update(body: &Map<String, Value>, entity: &EntityDef) -> Result<(), AppError> {
        for c in entity.columns.iter().filter(|c| !c.nullable) {
            if body.get(c.name).is_some_and(Value::is_null) {
                return Err(AppError::MissingField {
                    label: entity.label,
                    field: c.name,
                });
            }
        }
        Ok(())
    }

    /// A favorite body must name its target under `key`; null counts as absent.
    pub fn require_name<'a>(body: &'a Map<String, Value>, key: &str, label: &'static str) -> Result<&'a Value, AppError> {
        body.get(key).filter(|v| !v.is_null()).ok_or_else(|| AppError::MissingName {
            label,
            key: key.to_string(),
        })
    }
}
