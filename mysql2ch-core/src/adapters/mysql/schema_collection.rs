//! MySQL column metadata collection.
//!
//! One query per table against `INFORMATION_SCHEMA.COLUMNS`. Text columns
//! are cast to CHAR because MySQL 8.0 reports some catalog values as
//! VARBINARY.

use crate::Result;
use crate::error::Mysql2ChError;
use crate::models::ColumnDescriptor;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Column lookup for one table, in declared column order.
///
/// When the session has a current database the lookup is scoped to it;
/// without one, every schema's table of that name matches.
pub const COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME,
        CAST(DATA_TYPE AS CHAR) AS DATA_TYPE,
        CAST(IFNULL(COLUMN_COMMENT, '') AS CHAR) AS COLUMN_COMMENT,
        CAST(IFNULL(NUMERIC_PRECISION, 0) AS UNSIGNED) AS NUMERIC_PRECISION,
        CAST(IS_NULLABLE AS CHAR) AS IS_NULLABLE
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_NAME = ?
    AND (DATABASE() IS NULL OR TABLE_SCHEMA = DATABASE())
    ORDER BY TABLE_SCHEMA, ORDINAL_POSITION
"#;

/// Extracts typed values from catalog rows with table context in errors.
trait RowExt {
    fn get_field<'r, T>(&'r self, field_name: &str, table: &str) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>;
}

impl RowExt for MySqlRow {
    fn get_field<'r, T>(&'r self, field_name: &str, table: &str) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        self.try_get(field_name)
            .map_err(|e| Mysql2ChError::parse_field(field_name, table, e))
    }
}

/// Fetches the columns of `table`.
///
/// A missing table yields an empty vector.
pub(crate) async fn collect_table_columns(
    pool: &MySqlPool,
    table: &str,
) -> Result<Vec<ColumnDescriptor>> {
    tracing::debug!("Querying INFORMATION_SCHEMA.COLUMNS for '{}'", table);

    let rows = sqlx::query(COLUMNS_QUERY)
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|e| Mysql2ChError::catalog_query_failed(table, e))?;

    let columns = rows
        .iter()
        .map(|row| column_from_row(row, table))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Table '{}' has {} columns", table, columns.len());
    Ok(columns)
}

fn column_from_row(row: &MySqlRow, table: &str) -> Result<ColumnDescriptor> {
    let name: String = row.get_field("COLUMN_NAME", table)?;
    let data_type: String = row.get_field("DATA_TYPE", table)?;
    let comment: String = row.get_field("COLUMN_COMMENT", table)?;
    let precision: u64 = row.get_field("NUMERIC_PRECISION", table)?;
    let is_nullable: String = row.get_field("IS_NULLABLE", table)?;

    Ok(column_from_parts(
        name,
        &data_type,
        comment,
        precision,
        &is_nullable,
    ))
}

/// Builds a descriptor from raw catalog values.
///
/// The declared type is lowercased; `IS_NULLABLE` is `"YES"` for nullable
/// columns. Precision beyond `u32` saturates.
pub fn column_from_parts(
    name: String,
    data_type: &str,
    comment: String,
    numeric_precision: u64,
    is_nullable: &str,
) -> ColumnDescriptor {
    ColumnDescriptor::new(name, data_type.to_lowercase())
        .with_comment(comment)
        .with_precision(u32::try_from(numeric_precision).unwrap_or(u32::MAX))
        .nullable(is_nullable.eq_ignore_ascii_case("YES"))
}
