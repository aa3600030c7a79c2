//! Stockroom: REST backend for inventory locations, raw materials, products and orders.

pub mod auth;
pub mod db;
pub mod error;
mod extractors;
pub mod handlers;
pub mod migration;
pub mod pagination;
pub mod repository;
pub mod resources;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;

pub use auth::{Claims, CurrentUser, TokenVerifier};
pub use db::{connect, ensure_database_exists};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, common_routes, common_routes_with_ready};
pub use settings::Settings;
pub use state::AppState;
