//! Core data structures and logic for mysql2ch.
//!
//! This crate reads column metadata from a MySQL catalog and renders
//! equivalent `CREATE TABLE` statements for ClickHouse. The binary crate
//! is a thin CLI over the types exported here.
//!
//! # Guarantees
//! - Catalog access is read-only and uses bound parameters only
//! - Connection strings are redacted in every error and log line
//! - Rendering is a pure function of the resolved metadata
//!
//! # Architecture
//! - [`adapters`]: the [`CatalogSource`] seam and its MySQL implementation
//! - [`ddl`]: type mapping and statement rendering
//! - [`batch`]: sequential resolve-then-render over a list of tables

pub mod adapters;
pub mod batch;
pub mod ddl;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use adapters::{CatalogSource, ConnectionConfig};
pub use batch::{BatchReport, TableReport, parse_table_list, run_batch};
pub use ddl::{
    DdlRenderer, EngineSpec, TargetType, TypeMapping, UnmappedPolicy, UnmappedType,
    render_create_table,
};
pub use error::{Mysql2ChError, Result};
pub use logging::init_logging;
pub use models::{ColumnDescriptor, TableDescriptor};
