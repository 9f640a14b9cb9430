//! Data models for dbstruct.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod schema;

// Re-export commonly used types
pub use connection::{ConnectionConfig, DatabaseKind};
pub use schema::{ColumnDescriptor, FieldLine};
