//! Connection-related data models.
//!
//! This module defines the supported database kinds and the connection
//! settings derived from the configuration block.

use crate::error::{GenError, GenResult};
use serde::Serialize;
use std::fmt;
use url::Url;

/// Supported database kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// Includes MariaDB
    MySql,
    Postgres,
}

impl DatabaseKind {
    /// Parse the `dbType` value of the configuration block.
    pub fn parse(value: &str) -> GenResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "postgres" => Ok(Self::Postgres),
            _ => Err(GenError::unsupported_database_kind(value)),
        }
    }

    /// Get the display name for this database kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Postgres => "PostgreSQL",
        }
    }

    /// URL scheme understood by the driver.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::MySql => 3306,
            Self::Postgres => 5432,
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Settings for the single connection opened by the generator.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub kind: DatabaseKind,
    pub host: String,
    /// None falls back to the kind's default port.
    pub port: Option<u16>,
    pub user: String,
    /// Contains sensitive data - never log
    pub password: String,
    pub database: String,
}

impl ConnectionConfig {
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or_else(|| self.kind.default_port())
    }

    /// Build the driver URL. Credentials are percent-encoded.
    pub fn connection_url(&self) -> GenResult<Url> {
        let mut url = Url::parse(&format!("{}://localhost", self.kind.scheme()))
            .map_err(|e| GenError::config_invalid(format!("Invalid connection URL: {e}")))?;

        let host = if self.host.trim().is_empty() {
            "localhost"
        } else {
            self.host.trim()
        };
        url.set_host(Some(host))
            .map_err(|e| GenError::config_invalid(format!("Invalid dbHost '{host}': {e}")))?;

        // Setters below only fail for URLs without a host, which was set above.
        let _ = url.set_port(Some(self.port_or_default()));
        if !self.user.is_empty() {
            let _ = url.set_username(&self.user);
        }
        if !self.password.is_empty() {
            let _ = url.set_password(Some(&self.password));
        }
        url.set_path(&self.database);

        if self.kind == DatabaseKind::Postgres {
            url.query_pairs_mut().append_pair("sslmode", "disable");
        }
        Ok(url)
    }

    /// Get a display-safe version of the connection URL (password masked).
    pub fn masked_url(&self) -> String {
        match self.connection_url() {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.to_string()
            }
            Err(_) => format!("{}://{}", self.kind.scheme(), self.host),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"****")
            .field("database", &self.database)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: DatabaseKind) -> ConnectionConfig {
        ConnectionConfig {
            kind,
            host: "db.internal".to_string(),
            port: None,
            user: "app".to_string(),
            password: "s3cr@t/pw".to_string(),
            database: "shop".to_string(),
        }
    }

    #[test]
    fn test_database_kind_parse() {
        assert_eq!(DatabaseKind::parse("mysql").unwrap(), DatabaseKind::MySql);
        assert_eq!(
            DatabaseKind::parse("postgres").unwrap(),
            DatabaseKind::Postgres
        );
        assert_eq!(DatabaseKind::parse(" MySQL ").unwrap(), DatabaseKind::MySql);
    }

    #[test]
    fn test_database_kind_parse_unsupported() {
        for value in ["", "sqlite", "oracle", "postgresql"] {
            let err = DatabaseKind::parse(value).unwrap_err();
            assert!(
                matches!(err, GenError::UnsupportedDatabaseKind { .. }),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(config(DatabaseKind::MySql).port_or_default(), 3306);
        assert_eq!(config(DatabaseKind::Postgres).port_or_default(), 5432);
    }

    #[test]
    fn test_mysql_url() {
        let url = config(DatabaseKind::MySql).connection_url().unwrap();
        assert_eq!(url.scheme(), "mysql");
        assert_eq!(url.host_str(), Some("db.internal"));
        assert_eq!(url.port(), Some(3306));
        assert_eq!(url.username(), "app");
        assert_eq!(url.path(), "/shop");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_postgres_url_disables_ssl() {
        let mut cfg = config(DatabaseKind::Postgres);
        cfg.port = Some(6543);
        let url = cfg.connection_url().unwrap();
        assert_eq!(url.port(), Some(6543));
        assert_eq!(url.query(), Some("sslmode=disable"));
    }

    #[test]
    fn test_password_is_percent_encoded() {
        let url = config(DatabaseKind::MySql).connection_url().unwrap();
        let password = url.password().unwrap();
        assert!(!password.contains('@'));
        assert!(!password.contains('/'));
    }

    #[test]
    fn test_empty_host_defaults_to_localhost() {
        let mut cfg = config(DatabaseKind::MySql);
        cfg.host = String::new();
        let url = cfg.connection_url().unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_masked_url_hides_password() {
        let masked = config(DatabaseKind::MySql).masked_url();
        assert!(!masked.contains("s3cr"));
        assert!(masked.contains("****"));
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", config(DatabaseKind::Postgres));
        assert!(!debug.contains("s3cr"));
    }
}
