//! Generator pipeline.
//!
//! A run moves through `Idle -> ConfigLoaded -> Connected -> Queried ->
//! Rendered -> Done`. Any failure moves it to `Failed` and is returned to the
//! caller; nothing is retried and no partial struct is produced.

use crate::codegen::{GenerateOptions, build_field_line, render_struct};
use crate::config::{GenerateConfig, load_config};
use crate::db::{ColumnRows, DbConnection, SchemaInspector};
use crate::error::GenResult;
use crate::models::{ColumnDescriptor, FieldLine};
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// Pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ConfigLoaded,
    Connected,
    Queried,
    Rendered,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ConfigLoaded => "config_loaded",
            Self::Connected => "connected",
            Self::Queried => "queried",
            Self::Rendered => "rendered",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Map columns to field lines, preserving order. The first failure aborts.
pub fn build_field_lines(
    columns: &[ColumnDescriptor],
    options: &GenerateOptions,
) -> GenResult<Vec<FieldLine>> {
    columns
        .iter()
        .map(|col| build_field_line(col, options))
        .collect()
}

/// Generate struct text from already-decoded column descriptors.
pub fn generate_struct(columns: &[ColumnDescriptor], options: &GenerateOptions) -> GenResult<String> {
    let fields = build_field_lines(columns, options)?;
    Ok(render_struct(&options.struct_name, &fields))
}

/// Drives one generation run.
#[derive(Debug)]
pub struct Generator {
    stage: Stage,
}

impl Generator {
    pub fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = %self.stage, to = %next, "Pipeline stage");
        self.stage = next;
    }

    /// Pass `result` through, moving to `Failed` on error.
    fn check<T>(&mut self, result: GenResult<T>) -> GenResult<T> {
        result.map_err(|err| {
            error!(stage = %self.stage, error = %err, "Generation failed");
            self.stage = Stage::Failed;
            err
        })
    }

    /// Idle -> ConfigLoaded
    pub fn load_config(&mut self, path: impl AsRef<Path>, profile: &str) -> GenResult<GenerateConfig> {
        let config = self.check(load_config(path, profile))?;
        info!(config = ?config, "Loaded configuration");
        self.advance(Stage::ConfigLoaded);
        Ok(config)
    }

    /// ConfigLoaded -> Connected
    ///
    /// The database kind is resolved before any network activity. A
    /// connection that fails its liveness check is closed before returning.
    pub async fn connect(&mut self, config: &GenerateConfig) -> GenResult<DbConnection> {
        let conn_config = self.check(config.connection_config())?;
        let mut conn = self.check(DbConnection::open(&conn_config).await)?;

        if let Err(e) = conn.ping().await {
            conn.close().await;
            return self.check(Err(e));
        }

        info!(db_kind = %conn.kind(), "Successfully connected");
        self.advance(Stage::Connected);
        Ok(conn)
    }

    /// Connected -> Queried
    pub async fn query(&mut self, conn: &mut DbConnection, table_name: &str) -> GenResult<ColumnRows> {
        let rows = self.check(SchemaInspector::query_columns(conn, table_name).await)?;
        info!(table = %table_name, columns = rows.len(), "Queried column metadata");
        self.advance(Stage::Queried);
        Ok(rows)
    }

    /// Queried -> Rendered -> Done
    pub fn render(&mut self, rows: &ColumnRows, options: &GenerateOptions) -> GenResult<String> {
        let columns = self.check(rows.decode())?;
        let fields = self.check(build_field_lines(&columns, options))?;
        self.advance(Stage::Rendered);

        let output = render_struct(&options.struct_name, &fields);
        self.advance(Stage::Done);
        Ok(output)
    }

    /// Run every stage after configuration loading.
    ///
    /// The connection is closed once the result set has been fetched,
    /// whether or not the query succeeded.
    pub async fn generate(&mut self, config: &GenerateConfig) -> GenResult<String> {
        let start = Instant::now();

        let mut conn = self.connect(config).await?;
        let rows = self.query(&mut conn, &config.table_name).await;
        conn.close().await;
        let rows = rows?;

        let output = self.render(&rows, &config.options)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query processing time"
        );
        Ok(output)
    }

    /// Load the configuration block and run the whole pipeline.
    pub async fn run(&mut self, path: impl AsRef<Path>, profile: &str) -> GenResult<String> {
        let config = self.load_config(path, profile)?;
        self.generate(&config).await
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
