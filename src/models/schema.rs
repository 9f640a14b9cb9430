//! Schema-related data models.
//!
//! A [`ColumnDescriptor`] is one row of the information-schema query; a
//! [`FieldLine`] is the struct field generated from it.

use serde::Serialize;

/// Column metadata as reported by the information schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// 1-based
    pub ordinal_position: i64,
    pub nullable: bool,
    /// Base type, e.g. `varchar`
    pub data_type: String,
    /// Full type, e.g. `varchar(255)` (MySQL) or `varchar` (PostgreSQL `udt_name`)
    pub column_type: String,
}

impl ColumnDescriptor {
    /// Create a new column descriptor.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            ordinal_position: 0,
            nullable,
            column_type: data_type.clone(),
            data_type,
        }
    }

    pub fn with_ordinal_position(mut self, position: i64) -> Self {
        self.ordinal_position = position;
        self
    }

    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }

    /// The information schema reports nullability as `YES`/`NO`.
    pub fn is_nullable_flag(value: &str) -> bool {
        value == "YES"
    }
}

/// One generated struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLine {
    /// Exported identifier, e.g. `UserId`
    pub field_name: String,
    /// Target type, e.g. `int64` or `null.Time`
    pub field_type: String,
    /// Value of the `json` tag
    pub json_tag: String,
    /// Value of the `db` tag
    pub column: String,
}
