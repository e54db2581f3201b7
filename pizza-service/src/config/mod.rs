//! Configuration module for pizza-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Store used when `DB_URI` is not set: a SQLite file next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

#[derive(Debug, Clone)]
pub struct PizzaConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl PizzaConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "pizza-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            database: DatabaseConfig {
                url: env::var("DB_URI").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 1),
            },
        })
    }
}

fn parse_env(key: &str, default: u32) -> u32 {
    parse_or(env::var(key).ok().as_deref(), default)
}

fn parse_or(value: Option<&str>, default: u32) -> u32 {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
