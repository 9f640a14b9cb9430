//! Database access layer.
//!
//! This module provides database access functionality:
//! - Single-connection lifecycle (open, ping, close)
//! - Column introspection through the information schema
//! - Database dispatch macro for reducing code duplication

#[macro_use]
pub mod macros;
pub mod connection;
pub mod schema;

pub use connection::DbConnection;
pub use schema::{ColumnRows, SchemaInspector};
