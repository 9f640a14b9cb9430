//! Column introspection through the information schema.
//!
//! # Architecture
//!
//! Each database kind has exactly one query, kept in the `queries`
//! submodule. Executing the query and decoding its rows are separate steps:
//! [`SchemaInspector::query_columns`] fetches the whole result set, and
//! [`ColumnRows::decode`] turns each row into a [`ColumnDescriptor`], so a
//! query failure and a row decode failure are reported distinctly.

use crate::db::connection::DbConnection;
use crate::error::{GenError, GenResult};
use crate::models::ColumnDescriptor;
use sqlx::Row;
use sqlx::mysql::MySqlRow;
use sqlx::postgres::PgRow;
use tracing::debug;

// =============================================================================
// SQL Query Templates
// =============================================================================

mod queries {
    pub mod mysql {
        /// Without a selected database, `DATABASE()` is NULL and every schema matches.
        pub const DESCRIBE_COLUMNS: &str = r#"
        SELECT
            CONVERT(COLUMN_NAME USING utf8mb4) AS COLUMN_NAME,
            CAST(ORDINAL_POSITION AS SIGNED) AS ORDINAL_POSITION,
            CONVERT(IS_NULLABLE USING utf8mb4) AS IS_NULLABLE,
            CONVERT(DATA_TYPE USING utf8mb4) AS DATA_TYPE,
            CONVERT(COLUMN_TYPE USING utf8mb4) AS COLUMN_TYPE
        FROM information_schema.COLUMNS
        WHERE TABLE_NAME = ? AND TABLE_SCHEMA = COALESCE(DATABASE(), TABLE_SCHEMA)
        ORDER BY ORDINAL_POSITION
        "#;
    }

    pub mod postgres {
        /// PostgreSQL has no `column_type`; `udt_name` (e.g. `int4`) stands in for it.
        pub const DESCRIBE_COLUMNS: &str = r#"
        SELECT
            column_name::text AS column_name,
            ordinal_position::int8 AS ordinal_position,
            is_nullable::text AS is_nullable,
            data_type::text AS data_type,
            udt_name::text AS column_type
        FROM information_schema.columns
        WHERE table_name = $1 AND table_schema = current_schema()
        ORDER BY ordinal_position
        "#;
    }
}

/// Raw result set of the column query.
pub enum ColumnRows {
    MySql(Vec<MySqlRow>),
    Postgres(Vec<PgRow>),
}

impl ColumnRows {
    pub fn len(&self) -> usize {
        match self {
            ColumnRows::MySql(rows) => rows.len(),
            ColumnRows::Postgres(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode every row in query order. The first failure aborts decoding.
    pub fn decode(&self) -> GenResult<Vec<ColumnDescriptor>> {
        let columns = match self {
            ColumnRows::MySql(rows) => rows
                .iter()
                .enumerate()
                .map(|(i, row)| mysql::decode_row(row).map_err(|e| GenError::row_decode(i, e)))
                .collect::<GenResult<Vec<_>>>()?,
            ColumnRows::Postgres(rows) => rows
                .iter()
                .enumerate()
                .map(|(i, row)| postgres::decode_row(row).map_err(|e| GenError::row_decode(i, e)))
                .collect::<GenResult<Vec<_>>>()?,
        };

        for col in &columns {
            debug!(
                column = %col.name,
                ordinal_position = col.ordinal_position,
                nullable = col.nullable,
                data_type = %col.data_type,
                column_type = %col.column_type,
                "Column"
            );
        }
        Ok(columns)
    }
}

/// Schema inspector for column introspection.
pub struct SchemaInspector;

impl SchemaInspector {
    /// Run the column query for `table_name` and fetch the whole result set.
    pub async fn query_columns(conn: &mut DbConnection, table_name: &str) -> GenResult<ColumnRows> {
        let rows = match conn {
            DbConnection::MySql(c) => ColumnRows::MySql(
                sqlx::query(queries::mysql::DESCRIBE_COLUMNS)
                    .bind(table_name)
                    .fetch_all(c)
                    .await
                    .map_err(GenError::from_query_error)?,
            ),
            DbConnection::Postgres(c) => ColumnRows::Postgres(
                sqlx::query(queries::postgres::DESCRIBE_COLUMNS)
                    .bind(table_name)
                    .fetch_all(c)
                    .await
                    .map_err(GenError::from_query_error)?,
            ),
        };

        debug!(table = %table_name, rows = rows.len(), "Fetched column metadata");
        Ok(rows)
    }
}

// =============================================================================
// Database-Specific Row Decoding
// =============================================================================

mod mysql {
    use super::*;

    /// MySQL may return VARBINARY instead of VARCHAR depending on charset
    /// configuration, so fall back to decoding raw bytes as UTF-8.
    fn get_string(row: &MySqlRow, column: &str) -> Result<String, String> {
        if let Ok(s) = row.try_get::<String, _>(column) {
            return Ok(s);
        }
        let bytes = row
            .try_get::<Vec<u8>, _>(column)
            .map_err(|e| format!("{column}: {e}"))?;
        String::from_utf8(bytes).map_err(|e| format!("{column}: {e}"))
    }

    /// Handles both signed and unsigned integers across server versions.
    fn get_i64(row: &MySqlRow, column: &str) -> Result<i64, String> {
        if let Ok(v) = row.try_get::<i64, _>(column) {
            return Ok(v);
        }
        let v = row
            .try_get::<u64, _>(column)
            .map_err(|e| format!("{column}: {e}"))?;
        i64::try_from(v).map_err(|e| format!("{column}: {e}"))
    }

    pub(super) fn decode_row(row: &MySqlRow) -> Result<ColumnDescriptor, String> {
        let name = get_string(row, "COLUMN_NAME")?;
        let ordinal_position = get_i64(row, "ORDINAL_POSITION")?;
        let nullable = get_string(row, "IS_NULLABLE")?;
        let data_type = get_string(row, "DATA_TYPE")?;
        let column_type = get_string(row, "COLUMN_TYPE")?;

        Ok(
            ColumnDescriptor::new(name, data_type, ColumnDescriptor::is_nullable_flag(&nullable))
                .with_ordinal_position(ordinal_position)
                .with_column_type(column_type),
        )
    }
}

mod postgres {
    use super::*;

    fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, String>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        row.try_get::<T, _>(column)
            .map_err(|e| format!("{column}: {e}"))
    }

    pub(super) fn decode_row(row: &PgRow) -> Result<ColumnDescriptor, String> {
        let name: String = get(row, "column_name")?;
        let ordinal_position: i64 = get(row, "ordinal_position")?;
        let nullable: String = get(row, "is_nullable")?;
        let data_type: String = get(row, "data_type")?;
        let column_type: String = get(row, "column_type")?;

        Ok(
            ColumnDescriptor::new(name, data_type, ColumnDescriptor::is_nullable_flag(&nullable))
                .with_ordinal_position(ordinal_position)
                .with_column_type(column_type),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_filter_by_table_and_order_by_position() {
        assert!(queries::mysql::DESCRIBE_COLUMNS.contains("TABLE_NAME = ?"));
        assert!(queries::mysql::DESCRIBE_COLUMNS.contains("ORDER BY ORDINAL_POSITION"));
        assert!(queries::postgres::DESCRIBE_COLUMNS.contains("table_name = $1"));
        assert!(queries::postgres::DESCRIBE_COLUMNS.contains("ORDER BY ordinal_position"));
    }

    #[test]
    fn test_empty_rows_decode_to_no_columns() {
        let rows = ColumnRows::MySql(Vec::new());
        assert!(rows.is_empty());
        assert!(rows.decode().unwrap().is_empty());

        let rows = ColumnRows::Postgres(Vec::new());
        assert_eq!(rows.len(), 0);
        assert!(rows.decode().unwrap().is_empty());
    }
}
