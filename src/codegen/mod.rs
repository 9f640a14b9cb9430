//! Go struct generation.
//!
//! This module turns column descriptors into struct source text:
//! - Identifier casing
//! - Type mapping rules
//! - Field name and tag derivation
//! - Struct rendering

pub mod casing;
pub mod field;
pub mod render;
pub mod type_map;

pub use casing::{lower_initial, upper_initial};
pub use field::{JsonFormat, build_field_line, field_identifier};
pub use render::render_struct;
pub use type_map::{GoType, map_type};

/// Options controlling the generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub struct_name: String,
    pub json_format: JsonFormat,
    /// Fail on types with no mapping rule instead of emitting them verbatim.
    pub strict_types: bool,
}

impl GenerateOptions {
    pub fn new(struct_name: impl Into<String>, json_format: JsonFormat) -> Self {
        Self {
            struct_name: struct_name.into(),
            json_format,
            strict_types: false,
        }
    }

    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }
}
