//! Holocron: REST backend for users, planets, vehicles, characters and per-user favorites.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{validate, EntityKind, ResourceModel};
pub use response::{error_body, ok, ok_info};
pub use routes::{app, http_service};
pub use service::{CrudService, FavoriteService};
pub use settings::Settings;
pub use state::AppState;
pub use store::connect;
