//! Sequential resolve-then-render over a list of tables.
//!
//! Each table is resolved and rendered before the next one starts. A failed
//! catalog query is recorded in that table's report and the table is still
//! rendered, with whatever columns came back (none).

use crate::Result;
use crate::adapters::CatalogSource;
use crate::ddl::{DdlRenderer, UnmappedType};
use crate::error::Mysql2ChError;
use crate::models::TableDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// MySQL's identifier length limit.
pub const MAX_TABLE_NAME_LEN: usize = 64;

/// Splits a comma-separated table list.
///
/// Names are trimmed; order and duplicates are kept.
///
/// # Errors
/// Returns a configuration error if the list is empty, contains an empty
/// name, or a name longer than 64 characters.
///
/// # Example
/// ```rust
/// use mysql2ch_core::batch::parse_table_list;
///
/// let tables = parse_table_list("orders, customers").unwrap();
/// assert_eq!(tables, ["orders", "customers"]);
/// assert!(parse_table_list("orders,,customers").is_err());
/// ```
pub fn parse_table_list(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Err(Mysql2ChError::configuration("tables must not be empty"));
    }

    raw.split(',')
        .map(str::trim)
        .map(|name| {
            if name.is_empty() {
                Err(Mysql2ChError::configuration(format!(
                    "table list '{}' contains an empty name",
                    raw
                )))
            } else if name.chars().count() > MAX_TABLE_NAME_LEN {
                Err(Mysql2ChError::configuration(format!(
                    "table name '{}' exceeds {} characters",
                    name, MAX_TABLE_NAME_LEN
                )))
            } else {
                Ok(name.to_string())
            }
        })
        .collect()
}

/// Outcome for one requested table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    /// Columns returned by the catalog
    pub column_count: usize,
    /// Catalog query failure, if any
    pub resolution_error: Option<String>,
    /// Rendering refusal under the `fail` policy, if any
    pub render_error: Option<String>,
    /// Columns whose declared type had no mapping
    pub unmapped: Vec<UnmappedType>,
    /// The statement, absent only when rendering was refused
    pub ddl: Option<String>,
}

impl TableReport {
    /// True when the catalog answered and the statement was rendered.
    pub const fn is_success(&self) -> bool {
        self.resolution_error.is_none() && self.render_error.is_none()
    }
}

/// Per-table outcomes in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub tables: Vec<TableReport>,
}

impl BatchReport {
    pub fn new(tables: Vec<TableReport>) -> Self {
        Self {
            generated_at: Utc::now(),
            tables,
        }
    }

    /// Rendered statements in request order.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().filter_map(|t| t.ddl.as_deref())
    }

    /// Number of tables that failed to resolve or render.
    pub fn failed_count(&self) -> usize {
        self.tables.iter().filter(|t| !t.is_success()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.tables.iter().any(|t| !t.is_success())
    }

    /// Writes each statement followed by a newline.
    ///
    /// # Errors
    /// Returns error if the writer fails.
    pub fn write_statements<W: Write>(&self, out: &mut W) -> Result<()> {
        let write_failed = |e| Mysql2ChError::io("Failed to write DDL output", e);
        for ddl in self.statements() {
            writeln!(out, "{}", ddl).map_err(write_failed)?;
        }
        out.flush().map_err(write_failed)
    }

    /// Serializes the report as pretty JSON.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Mysql2ChError::Serialization {
            context: "batch report".to_string(),
            source: e,
        })
    }
}

/// Resolves and renders each table in order.
///
/// Never fails as a whole: every requested table gets a [`TableReport`],
/// in the order given.
pub async fn run_batch<S>(source: &S, renderer: &DdlRenderer, tables: &[String]) -> BatchReport
where
    S: CatalogSource + ?Sized,
{
    let mut reports = Vec::with_capacity(tables.len());

    for name in tables {
        reports.push(process_table(source, renderer, name).await);
    }

    let report = BatchReport::new(reports);
    tracing::info!(
        "Processed {} tables from {} ({} failed)",
        report.tables.len(),
        source.source_name(),
        report.failed_count()
    );
    report
}

async fn process_table<S>(source: &S, renderer: &DdlRenderer, name: &str) -> TableReport
where
    S: CatalogSource + ?Sized,
{
    let (columns, resolution_error) = match source.fetch_columns(name).await {
        Ok(columns) => {
            if columns.is_empty() {
                tracing::warn!("Table '{}' has no columns in the catalog", name);
            }
            (columns, None)
        }
        Err(e) => {
            tracing::error!("Failed to resolve columns for '{}': {}", name, e);
            (Vec::new(), Some(e.to_string()))
        }
    };

    let table = TableDescriptor::new(name, columns);
    let column_count = table.columns.len();

    match renderer.render(&table) {
        Ok(rendered) => {
            for gap in &rendered.unmapped {
                tracing::warn!(
                    "Table '{}': {} ({} policy)",
                    name,
                    gap,
                    renderer.unmapped_policy()
                );
            }
            TableReport {
                table: table.name,
                column_count,
                resolution_error,
                render_error: None,
                unmapped: rendered.unmapped,
                ddl: Some(rendered.ddl),
            }
        }
        Err(gaps) => {
            let message = gaps
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            tracing::error!("Refusing to render '{}': {}", name, message);
            TableReport {
                table: table.name,
                column_count,
                resolution_error,
                render_error: Some(message),
                unmapped: gaps,
                ddl: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_list_trims_and_keeps_order() {
        let tables = parse_table_list(" t2 ,t1, t2").unwrap();
        assert_eq!(tables, ["t2", "t1", "t2"]);
    }

    #[test]
    fn test_parse_table_list_rejects_empty() {
        assert!(parse_table_list("").is_err());
        assert!(parse_table_list("  ").is_err());
        assert!(parse_table_list("a,").is_err());
    }

    #[test]
    fn test_parse_table_list_rejects_long_names() {
        let long = "t".repeat(MAX_TABLE_NAME_LEN + 1);
        assert!(parse_table_list(&long).is_err());
        assert!(parse_table_list(&"t".repeat(MAX_TABLE_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_write_statements_skips_refused_tables() {
        let report = BatchReport::new(vec![
            TableReport {
                table: "a".to_string(),
                column_count: 0,
                resolution_error: None,
                render_error: None,
                unmapped: Vec::new(),
                ddl: Some("DDL A".to_string()),
            },
            TableReport {
                table: "b".to_string(),
                column_count: 1,
                resolution_error: None,
                render_error: Some("column 'x' has unmapped type 'json'".to_string()),
                unmapped: Vec::new(),
                ddl: None,
            },
        ]);

        let mut out = Vec::new();
        report.write_statements(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "DDL A\n");
        assert_eq!(report.failed_count(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn test_report_json() {
        let report = BatchReport::new(Vec::new());
        let json = report.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["generated_at"].is_string());
        assert!(value["tables"].as_array().unwrap().is_empty());
    }
}
