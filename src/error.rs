//! Typed errors and HTTP mapping.
//!
//! Every domain failure renders as `{"error": "<message>"}` with status 400, whatever its kind.
//! Store and configuration failures render with status 500 and are logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("table {0} has no name column")]
    MissingNameColumn(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("unsupported database url: {0}")]
    UnsupportedDatabase(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("You must send information with the body")]
    MissingBody,
    #[error("You must give the {label} {}", with_article(.field))]
    MissingField { label: &'static str, field: &'static str },
    #[error("You must give the {label} name with {key}")]
    MissingName { label: &'static str, key: String },
    #[error("This {field} already exists")]
    DuplicateUnique { field: &'static str },
    #[error("The {label} with id {id} doesn't exist")]
    NotFound { label: &'static str, id: i64 },
    #[error("The {label} {name} doesn't exist")]
    NameNotFound { label: &'static str, name: String },
    #[error("The user didn't favorite this {label} before")]
    FavoriteNotFound { label: &'static str },
    #[error("{0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn with_article(word: &str) -> String {
    let article = match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{} {}", article, word)
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                "internal database error".to_string()
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                "internal configuration error".to_string()
            }
            other => {
                tracing::warn!(error = %other, "request rejected");
                other.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_picks_article() {
        let name = AppError::MissingField { label: "planet", field: "name" };
        let email = AppError::MissingField { label: "user", field: "email" };
        assert_eq!(name.to_string(), "You must give the planet a name");
        assert_eq!(email.to_string(), "You must give the user an email");
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let e = AppError::NotFound { label: "user", id: 42 };
        assert_eq!(e.to_string(), "The user with id 42 doesn't exist");
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn domain_errors_share_status_400() {
        for e in [
            AppError::MissingBody,
            AppError::DuplicateUnique { field: "email" },
            AppError::FavoriteNotFound { label: "character" },
            AppError::BadRequest("invalid id".into()),
        ] {
            assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_errors_are_internal() {
        let e = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
