//! Process configuration from environment variables (optionally via `.env`).

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;
use std::time::Duration;

/// Only browser origin allowed to call the API.
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Preflight cache lifetime.
pub const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Request body limit in bytes.
pub const BODY_LIMIT: usize = 1024 * 1024;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Connection settings assembled from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Postgres connect options. TLS is disabled to match the deployed database.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub listen_addr: SocketAddr,
    /// DELETE routes were never mounted in the first deployment; keep a switch to reproduce that.
    pub delete_routes_enabled: bool,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseConfig {
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
            user: get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?,
        };

        let listen_addr = get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());
        let listen_addr: SocketAddr = listen_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "LISTEN_ADDR",
            value: listen_addr.clone(),
        })?;

        let delete_routes_enabled = match get("DELETE_ROUTES_ENABLED") {
            None => true,
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid {
                key: "DELETE_ROUTES_ENABLED",
                value: v,
            })?,
        };

        let timeout_secs: u64 = parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 30)?;

        Ok(AppConfig {
            database,
            listen_addr,
            delete_routes_enabled,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
