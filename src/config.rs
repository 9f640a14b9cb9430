//! Configuration handling for dbstruct.
//!
//! Process options come from CLI arguments and environment variables. The
//! generator settings come from one named block of a YAML (or JSON) file:
//!
//! ```yaml
//! generate-dbstruct:
//!   dbHost: 127.0.0.1
//!   dbPort: 3306
//!   dbName: shop
//!   dbUser: root
//!   dbPassword: secret
//!   dbType: mysql
//!   tableName: users
//!   jsonFormat: camelcase
//!   structName: User
//! ```

use crate::codegen::{GenerateOptions, JsonFormat};
use crate::error::{GenError, GenResult};
use crate::models::{ConnectionConfig, DatabaseKind};
use clap::Parser;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "generate.yml";
pub const DEFAULT_PROFILE: &str = "generate-dbstruct";

/// Command line options for dbstruct.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dbstruct",
    about = "Generate a Go struct from a database table's columns",
    version,
    author
)]
pub struct Config {
    /// Path to the YAML or JSON configuration file
    #[arg(
        short,
        long = "config",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH,
        env = "DBSTRUCT_CONFIG"
    )]
    pub config_path: String,

    /// Top-level key of the configuration block to use
    #[arg(
        short,
        long,
        value_name = "KEY",
        default_value = DEFAULT_PROFILE,
        env = "DBSTRUCT_PROFILE"
    )]
    pub profile: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DBSTRUCT_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "DBSTRUCT_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

/// `dbPort` may be written as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(u64),
    Text(String),
}

impl PortValue {
    /// Empty strings mean "use the default port".
    pub fn to_port(&self) -> GenResult<Option<u16>> {
        match self {
            Self::Number(n) => u16::try_from(*n)
                .map(Some)
                .map_err(|_| GenError::config_invalid(format!("dbPort {n} is out of range"))),
            Self::Text(s) if s.trim().is_empty() => Ok(None),
            Self::Text(s) => s
                .trim()
                .parse::<u16>()
                .map(Some)
                .map_err(|_| GenError::config_invalid(format!("dbPort '{s}' is not a valid port"))),
        }
    }
}

/// One configuration block as written in the file.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub db_host: String,
    pub db_port: Option<PortValue>,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_type: String,
    pub table_name: String,
    pub json_format: String,
    pub struct_name: String,
    pub strict_types: bool,
}

impl FileConfig {
    /// Validate the block and convert it into a [`GenerateConfig`].
    pub fn validate(self) -> GenResult<GenerateConfig> {
        if self.json_format.trim().is_empty() {
            return Err(GenError::config_invalid(
                "no valid config json format found",
            ));
        }
        let json_format = JsonFormat::parse(self.json_format.trim())?;

        let table_name = self.table_name.trim();
        if table_name.is_empty() {
            return Err(GenError::config_invalid("table name required"));
        }

        let struct_name = self.struct_name.trim();
        if struct_name.is_empty() {
            return Err(GenError::config_invalid("struct name required"));
        }
        if !is_identifier(struct_name) {
            return Err(GenError::config_invalid(format!(
                "struct name '{struct_name}' is not a valid identifier"
            )));
        }

        let port = match &self.db_port {
            Some(value) => value.to_port()?,
            None => None,
        };

        Ok(GenerateConfig {
            db_type: self.db_type,
            host: self.db_host,
            port,
            user: self.db_user,
            password: self.db_password,
            database: self.db_name,
            table_name: table_name.to_string(),
            options: GenerateOptions::new(struct_name, json_format)
                .with_strict_types(self.strict_types),
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Validated generator settings, immutable for the run.
#[derive(Clone)]
pub struct GenerateConfig {
    /// Raw `dbType`, parsed when connecting.
    pub db_type: String,
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    /// Contains sensitive data - never log
    pub password: String,
    pub database: String,
    pub table_name: String,
    pub options: GenerateOptions,
}

impl GenerateConfig {
    /// Resolve the database kind and build the connection settings.
    pub fn connection_config(&self) -> GenResult<ConnectionConfig> {
        let kind = DatabaseKind::parse(&self.db_type)?;
        Ok(ConnectionConfig {
            kind,
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        })
    }
}

impl fmt::Debug for GenerateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateConfig")
            .field("db_type", &self.db_type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"****")
            .field("database", &self.database)
            .field("table_name", &self.table_name)
            .field("options", &self.options)
            .finish()
    }
}

/// Parse a configuration document and select the `profile` block.
///
/// Documents whose `source` name ends in `.json` are parsed as JSON, all
/// others as YAML.
pub fn parse_config(source: &str, contents: &str, profile: &str) -> GenResult<GenerateConfig> {
    let is_json = Path::new(source)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let block: Option<FileConfig> = if is_json {
        let doc: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| GenError::config_invalid(format!("Invalid JSON in {source}: {e}")))?;
        doc.get(profile)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(|e| GenError::config_invalid(format!("Invalid block '{profile}': {e}")))?
    } else {
        let doc: serde_yaml::Value = serde_yaml::from_str(contents)
            .map_err(|e| GenError::config_invalid(format!("Invalid YAML in {source}: {e}")))?;
        doc.get(profile)
            .map(|v| serde_yaml::from_value(v.clone()))
            .transpose()
            .map_err(|e| GenError::config_invalid(format!("Invalid block '{profile}': {e}")))?
    };

    let block = block.ok_or_else(|| {
        GenError::config_missing(source, format!("no configuration block named '{profile}'"))
    })?;
    block.validate()
}

/// Read the configuration file at `path` and select the `profile` block.
pub fn load_config(path: impl AsRef<Path>, profile: &str) -> GenResult<GenerateConfig> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| GenError::config_missing(&source, e.to_string()))?;
    parse_config(&source, &contents, profile)
}
