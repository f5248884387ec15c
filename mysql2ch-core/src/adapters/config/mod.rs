//! Configuration types for catalog connections.
//!
//! # Security
//! These structs intentionally do NOT store passwords or credentials.

mod connection;

pub use connection::ConnectionConfig;
