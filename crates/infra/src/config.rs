//! Configuration loading and representation.
//!
//! Built once at startup and handed to whatever needs it; nothing reads the
//! environment after that.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const IN_MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddr { key: &'static str, value: String },

    #[error("{key} must be a positive integer, got {value}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be a boolean (1/0, true/false, yes/no), got {value}")]
    InvalidFlag { key: &'static str, value: String },
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Load the demo dataset before serving.
    pub seed_sample_data: bool,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr {
                key: "BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    });
                }
            },
        };

        let seed_sample_data = match lookup("SEED_SAMPLE_DATA") {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: "SEED_SAMPLE_DATA",
                value: raw.clone(),
            })?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            seed_sample_data,
        })
    }

    /// A private, process-local SQLite database (tests, demos).
    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            max_connections: 1,
            seed_sample_data: false,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
