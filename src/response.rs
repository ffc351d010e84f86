//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const OK: &str = "ok";

#[derive(Serialize)]
pub struct Envelope<T> {
    pub msg: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<T>,
}

/// `{"msg": "ok"}` with no payload, used by create, update and delete.
pub fn ok() -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::OK, Json(Envelope { msg: OK, info: None }))
}

/// `{"msg": "ok", "info": ...}`.
pub fn ok_info<T: Serialize>(info: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            msg: OK,
            info: Some(info),
        }),
    )
}

pub fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}
