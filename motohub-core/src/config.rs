//! Centralized configuration for MotoHub.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::str::FromStr;

use crate::{MotohubError, Result};

/// Keyword searched when a request carries no usable keyword.
pub const DEFAULT_KEYWORD: &str = "Rebel 250";

/// Central configuration for all MotoHub components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MotohubConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
}

/// HTTP server binding configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind to
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Listing database configuration.
///
/// The URL is handed to diesel's SQLite connection, so a plain file path
/// or `:memory:` both work.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite database location
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "motohub.db".to_string(),
            max_connections: 8,
        }
    }
}

/// Search behaviour configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Keyword used when the request has none
    pub default_keyword: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_keyword: DEFAULT_KEYWORD.to_string(),
        }
    }
}

impl MotohubConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// # Errors
    ///
    /// - `MotohubError::Configuration` - If `MOTOHUB_PORT` or
    ///   `MOTOHUB_DB_POOL_SIZE` is set but not a number
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Loads `.env` from the working directory, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// - `MotohubError::Configuration` - If an override value is invalid
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
        }
        Self::from_env()
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = lookup("MOTOHUB_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("MOTOHUB_PORT") {
            self.server.port = parse_number("MOTOHUB_PORT", &port)?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }

        if let Some(size) = lookup("MOTOHUB_DB_POOL_SIZE") {
            let size: u32 = parse_number("MOTOHUB_DB_POOL_SIZE", &size)?;
            self.database.max_connections = size.max(1);
        }

        if let Some(keyword) = lookup("MOTOHUB_DEFAULT_KEYWORD") {
            if !keyword.trim().is_empty() {
                self.search.default_keyword = keyword.trim().to_string();
            }
        }

        Ok(self)
    }

    /// Creates a configuration for tests backed by the given database.
    pub fn for_testing(database_url: &str) -> Self {
        Self {
            database: DatabaseConfig {
                url: database_url.to_string(),
                max_connections: 2,
            },
            ..Default::default()
        }
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MotohubError::Configuration {
            reason: format!("{key} must be a number, got '{value}'"),
        })
}
