//! Single database connection lifecycle.
//!
//! The generator needs exactly one round trip, so it opens one
//! database-specific connection (no pool), pings it, and closes it as soon
//! as the column query has been consumed.

use crate::error::{GenError, GenResult};
use crate::impl_db_dispatch;
use crate::models::{ConnectionConfig, DatabaseKind};
use sqlx::mysql::MySqlConnectOptions;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, MySqlConnection, PgConnection};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Database-specific connection.
pub enum DbConnection {
    MySql(MySqlConnection),
    Postgres(PgConnection),
}

impl DbConnection {
    /// Open a connection to the configured database.
    pub async fn open(config: &ConnectionConfig) -> GenResult<Self> {
        let url = config.connection_url()?;
        info!(
            db_kind = %config.kind,
            target = %config.masked_url(),
            "Connecting to database"
        );

        match config.kind {
            DatabaseKind::MySql => {
                let options = MySqlConnectOptions::from_str(url.as_str())
                    .map_err(|e| {
                        GenError::connection(
                            format!("Invalid MySQL connection settings: {}", e),
                            "Check dbHost, dbPort, dbUser and dbName",
                        )
                    })?
                    .charset("utf8mb4");

                let conn = MySqlConnection::connect_with(&options)
                    .await
                    .map_err(|e| {
                        GenError::connection(
                            format!("Failed to connect: {}", e),
                            connection_suggestion(config.kind, &e),
                        )
                    })?;
                Ok(DbConnection::MySql(conn))
            }
            DatabaseKind::Postgres => {
                let options = PgConnectOptions::from_str(url.as_str()).map_err(|e| {
                    GenError::connection(
                        format!("Invalid PostgreSQL connection settings: {}", e),
                        "Check dbHost, dbPort, dbUser and dbName",
                    )
                })?;

                let conn = PgConnection::connect_with(&options).await.map_err(|e| {
                    GenError::connection(
                        format!("Failed to connect: {}", e),
                        connection_suggestion(config.kind, &e),
                    )
                })?;
                Ok(DbConnection::Postgres(conn))
            }
        }
    }

    /// Get the database kind for this connection.
    pub fn kind(&self) -> DatabaseKind {
        match self {
            DbConnection::MySql(_) => DatabaseKind::MySql,
            DbConnection::Postgres(_) => DatabaseKind::Postgres,
        }
    }

    /// Check that the server answers.
    pub async fn ping(&mut self) -> GenResult<()> {
        let result = impl_db_dispatch!(self, {
            MySql(c) => c.ping().await,
            Postgres(c) => c.ping().await,
        });
        result.map_err(|e| GenError::liveness_check(e.to_string()))?;
        debug!(db_kind = %self.kind(), "Ping succeeded");
        Ok(())
    }

    /// Close the connection. Failures are logged, not returned.
    pub async fn close(self) {
        let kind = self.kind();
        let result = impl_db_dispatch!(self, {
            MySql(c) => c.close().await,
            Postgres(c) => c.close().await,
        });
        match result {
            Ok(()) => debug!(db_kind = %kind, "Connection closed"),
            Err(e) => warn!(db_kind = %kind, error = %e, "Failed to close connection cleanly"),
        }
    }
}

/// Derive a fix-it hint from a connect error.
pub(crate) fn connection_suggestion(kind: DatabaseKind, error: &sqlx::Error) -> String {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") {
        return format!("Check that the {} server is running and accessible", kind);
    }

    if error_str.contains("authentication")
        || error_str.contains("password")
        || error_str.contains("access denied")
    {
        return "Verify dbUser and dbPassword".to_string();
    }

    if error_str.contains("does not exist") || error_str.contains("unknown database") {
        return "Check that dbName exists".to_string();
    }

    if error_str.contains("tls") || error_str.contains("ssl") {
        return "Check the server's TLS/SSL requirements".to_string();
    }

    format!(
        "Verify dbHost and dbPort (default {} port is {})",
        kind,
        kind.default_port()
    )
}
