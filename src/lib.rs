//! Enrollment service: REST CRUD over students, courses and enrollments in PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{AppConfig, DatabaseConfig};
pub use error::{AppError, ConfigError};
pub use models::{Course, Enrollment, Student};
pub use routes::{app, RouterOptions};
pub use state::AppState;
pub use store::{PgStore, Repository, Store};
