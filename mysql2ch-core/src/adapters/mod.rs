//! Catalog access behind a single trait.
//!
//! The batch runner only sees [`CatalogSource`]. The MySQL implementation
//! lives in [`mysql`] and is compiled with the `mysql` feature.
//!
//! # Module Structure
//! - `config`: connection settings shared by catalog implementations
//! - `mysql`: `INFORMATION_SCHEMA.COLUMNS` reader over a single connection

use crate::{Result, models::ColumnDescriptor};
use async_trait::async_trait;

pub mod config;

pub use config::ConnectionConfig;

/// Read-only access to a database catalog.
///
/// # Object Safety
/// This trait is object-safe, so the binary can hold a
/// `Box<dyn CatalogSource>` returned by [`create_catalog`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the columns of one table in catalog order.
    ///
    /// A table that does not exist yields an empty vector, not an error.
    ///
    /// # Errors
    /// Returns error if the catalog query itself fails.
    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Short name of the source system, for logs.
    fn source_name(&self) -> &'static str;

    /// Connection settings in use (credentials omitted), for logs.
    fn connection_config(&self) -> ConnectionConfig;

    /// Releases the underlying connection.
    async fn close(&self) {}
}

/// Opens a catalog for the given connection string.
///
/// Accepts `mysql://` URLs and Go-driver style DSNs
/// (`user:pass@tcp(host:port)/db`).
///
/// # Errors
/// Returns error if:
/// - The connection string is malformed
/// - The MySQL driver is not compiled in
/// - The server cannot be reached
pub async fn create_catalog(connection_string: &str) -> Result<Box<dyn CatalogSource>> {
    if connection_string.trim().is_empty() {
        return Err(crate::error::Mysql2ChError::configuration(
            "connection string must not be empty",
        ));
    }

    #[cfg(feature = "mysql")]
    {
        let catalog = mysql::MySqlCatalog::connect(connection_string).await?;
        Ok(Box::new(catalog))
    }
    #[cfg(not(feature = "mysql"))]
    {
        Err(crate::error::Mysql2ChError::unsupported_feature(
            "MySQL catalog",
            "Compile with --features mysql to enable MySQL support",
        ))
    }
}

#[cfg(feature = "mysql")]
pub mod mysql;
