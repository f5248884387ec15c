//! Catalog connection configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the catalog connection.
///
/// # Security
/// This struct intentionally does NOT store passwords or credentials.
///
/// # Example
/// ```rust
/// use mysql2ch_core::adapters::ConnectionConfig;
///
/// let config = ConnectionConfig::new("localhost".to_string())
///     .with_port(3306)
///     .with_database("shop".to_string())
///     .with_username("root".to_string());
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database host address
    pub host: String,
    /// Optional port number
    pub port: Option<u16>,
    /// Database whose tables are looked up
    pub database: Option<String>,
    /// Optional username (password handled separately)
    pub username: Option<String>,
    /// How long to wait for the initial connection
    pub connect_timeout: Duration,
    /// Server-side statement limit; `None` leaves the server default
    pub query_timeout: Option<Duration>,
    /// Whether to open the session read-only
    pub read_only: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: None,
            database: None,
            username: None,
            connect_timeout: Duration::from_secs(30),
            query_timeout: None,
            read_only: true,
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ConnectionConfig({}{}{})",
            self.host,
            self.port.map_or_else(String::new, |p| format!(":{}", p)),
            self.database
                .as_ref()
                .map_or_else(String::new, |db| format!("/{}", db))
        )
        // Intentionally omit username and never include credentials
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if configuration values are invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.is_empty() {
            return Err(crate::error::Mysql2ChError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == Some(0) {
            return Err(crate::error::Mysql2ChError::configuration(
                "port must be greater than 0",
            ));
        }

        if let Some(database) = &self.database
            && database.len() > 64
        {
            return Err(crate::error::Mysql2ChError::configuration(
                "Database name too long: maximum 64 characters",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(crate::error::Mysql2ChError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        if self.query_timeout.is_some_and(|t| t.is_zero()) {
            return Err(crate::error::Mysql2ChError::configuration(
                "query_timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Creates a new connection config with safe defaults.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Builder method to set port.
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builder method to set database.
    pub fn with_database(mut self, database: String) -> Self {
        self.database = Some(database);
        self
    }

    /// Builder method to set username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Builder method to set a server-side query timeout.
    pub const fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }
}
