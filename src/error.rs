//! Error types for dbstruct.
//!
//! Every stage of the generator pipeline reports failures through [`GenError`].
//! Variants carry enough context to tell the user which input was wrong, and
//! some provide a suggestion for fixing it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Configuration not found: {message} (path: {path})")]
    ConfigMissing { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Unsupported database kind: '{kind}' (expected 'mysql' or 'postgres')")]
    UnsupportedDatabaseKind { kind: String },

    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Liveness check failed: {message}")]
    LivenessCheck { message: String },

    #[error("Query execution failed: {message}")]
    QueryExecution {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
    },

    #[error("Failed to decode row {row}: {message}")]
    RowDecode { row: usize, message: String },

    #[error("No type mapping for column '{column}' (data type: {data_type})")]
    UnmappedType { column: String, data_type: String },
}

impl GenError {
    /// Create a config missing error.
    pub fn config_missing(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigMissing {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// The naming convention is neither `underscore` nor `camelcase`.
    pub fn invalid_json_format() -> Self {
        Self::config_invalid("json format not valid")
    }

    pub fn unsupported_database_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedDatabaseKind { kind: kind.into() }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn liveness_check(message: impl Into<String>) -> Self {
        Self::LivenessCheck {
            message: message.into(),
        }
    }

    /// Create a query error with optional SQL state.
    pub fn query_execution(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::QueryExecution {
            message: message.into(),
            sql_state,
        }
    }

    /// Create a row decode error. `row` is zero-based.
    pub fn row_decode(row: usize, message: impl Into<String>) -> Self {
        Self::RowDecode {
            row,
            message: message.into(),
        }
    }

    pub fn unmapped_type(column: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::UnmappedType {
            column: column.into(),
            data_type: data_type.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::ConfigMissing { .. } => {
                Some("Pass --config <PATH> and --profile <KEY> to select the configuration block")
            }
            Self::ConfigInvalid { .. } => Some(
                "Check tableName, structName and jsonFormat (underscore or camelcase) in the configuration block",
            ),
            Self::UnsupportedDatabaseKind { .. } => Some("Set dbType to 'mysql' or 'postgres'"),
            Self::Connection { suggestion, .. } => Some(suggestion),
            Self::UnmappedType { .. } => {
                Some("Set strictTypes to false to emit the raw database type verbatim")
            }
            _ => None,
        }
    }

    /// Build a query error from a driver error, keeping the SQLSTATE when present.
    pub fn from_query_error(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                Self::query_execution(db_err.message(), code)
            }
            other => Self::query_execution(other.to_string(), None),
        }
    }
}

/// Result type alias for generator operations.
pub type GenResult<T> = Result<T, GenError>;
