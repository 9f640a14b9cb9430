//! dbstruct library
//!
//! Reads one table's column metadata from the information schema of a MySQL
//! or PostgreSQL database and generates a Go struct whose fields mirror the
//! columns, with `json` and `db` tags.

pub mod codegen;
pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod models;

pub use config::{Config, GenerateConfig};
pub use error::{GenError, GenResult};
pub use generator::{Generator, Stage, generate_struct};
