#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use holocron::{apply_migrations, connect, http_service, AppState, ResourceModel};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// Fresh in-memory database with the schema applied.
    pub async fn new() -> Self {
        Self::with_passwords(true).await
    }

    pub async fn with_passwords(expose: bool) -> Self {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        let model = ResourceModel::builtin(expose);
        apply_migrations(&pool, &model).await.unwrap();
        TestApp {
            state: AppState::new(pool, model),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.pool
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = http_service(self.state.clone()).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, body).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        holocron::CrudService::count(self.pool(), table).await.unwrap()
    }
}

pub fn error_of(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}
