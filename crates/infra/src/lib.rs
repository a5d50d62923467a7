//! Infrastructure layer: configuration, SQLite persistence and the services
//! the HTTP surface delegates to.

pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod services;

pub use config::{AppConfig, ConfigError};
pub use db::Database;
pub use error::{ServiceError, ServiceResult};
pub use services::Services;
