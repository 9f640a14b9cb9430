//! Field name, tag and type derivation for a single column.

use crate::codegen::casing::{lower_initial, upper_initial};
use crate::codegen::type_map::map_type;
use crate::codegen::GenerateOptions;
use crate::error::{GenError, GenResult};
use crate::models::{ColumnDescriptor, FieldLine};
use std::fmt;
use tracing::warn;

/// Naming convention of the `json` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// Tag is the raw column name, e.g. `user_id`
    Underscore,
    /// Tag is the lower-camel field name, e.g. `userId`
    CamelCase,
}

impl JsonFormat {
    /// Parse the `jsonFormat` value of the configuration block.
    pub fn parse(value: &str) -> GenResult<Self> {
        match value {
            "underscore" => Ok(Self::Underscore),
            "camelcase" => Ok(Self::CamelCase),
            _ => Err(GenError::invalid_json_format()),
        }
    }
}

impl fmt::Display for JsonFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underscore => write!(f, "underscore"),
            Self::CamelCase => write!(f, "camelcase"),
        }
    }
}

/// `user_id` -> `UserId`. Empty segments contribute nothing.
pub fn field_identifier(column_name: &str) -> String {
    column_name.split('_').map(upper_initial).collect()
}

pub fn json_tag(column_name: &str, field_name: &str, format: JsonFormat) -> String {
    match format {
        JsonFormat::Underscore => column_name.to_string(),
        JsonFormat::CamelCase => lower_initial(field_name),
    }
}

/// Resolve the Go type of a column.
///
/// Unmapped types are an error in strict mode and are passed through
/// verbatim otherwise.
pub fn resolve_type(column: &ColumnDescriptor, strict: bool) -> GenResult<String> {
    if let Some(go_type) = map_type(&column.data_type, column.nullable) {
        return Ok(go_type.as_str().to_string());
    }
    if strict {
        return Err(GenError::unmapped_type(&column.name, &column.data_type));
    }
    warn!(
        column = %column.name,
        data_type = %column.data_type,
        "No type mapping, emitting raw database type"
    );
    Ok(column.data_type.clone())
}

pub fn build_field_line(
    column: &ColumnDescriptor,
    options: &GenerateOptions,
) -> GenResult<FieldLine> {
    let field_name = field_identifier(&column.name);
    let json_tag = json_tag(&column.name, &field_name, options.json_format);
    let field_type = resolve_type(column, options.strict_types)?;

    Ok(FieldLine {
        field_name,
        field_type,
        json_tag,
        column: column.name.clone(),
    })
}
