//! MySQL catalog over a single read-only connection.
//!
//! # Module Structure
//! - `connection`: connection string handling (URL and Go DSN) and pool setup
//! - `schema_collection`: the `INFORMATION_SCHEMA.COLUMNS` query
//!
//! # Security Guarantees
//! - All operations are read-only (SELECT only)
//! - Table names are bound parameters, never spliced into SQL
//! - Connection strings are sanitized in error messages

pub mod connection;
pub mod schema_collection;


use super::{CatalogSource, ConnectionConfig};
use crate::Result;
use crate::models::ColumnDescriptor;
use async_trait::async_trait;
use sqlx::MySqlPool;

pub use connection::{dsn_to_url, normalize_connection_string, parse_mysql_connection_config};

/// MySQL catalog reader.
///
/// The pool is capped at one connection: it is opened in [`connect`],
/// reused for every table, and released by [`close`] or on drop.
///
/// [`connect`]: MySqlCatalog::connect
/// [`close`]: CatalogSource::close
pub struct MySqlCatalog {
    /// Single-connection pool for catalog queries
    pub pool: MySqlPool,
    /// Connection configuration (credentials omitted)
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCatalog")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogSource for MySqlCatalog {
    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        schema_collection::collect_table_columns(&self.pool, table).await
    }

    fn source_name(&self) -> &'static str {
        "MySQL"
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
