//! `CREATE TABLE` statement rendering.
//!
//! [`render_create_table`] is the pure string builder. [`DdlRenderer`] wraps
//! it with a [`TypeMapping`], an [`EngineSpec`] and an [`UnmappedPolicy`].
//!
//! Names and comments are inserted verbatim. A backtick or single quote in
//! either produces a broken statement.

use super::type_mapping::{TargetType, TypeMapping, UnmappedType};
use crate::error::Mysql2ChError;
use crate::models::TableDescriptor;
use serde::{Deserialize, Serialize};

/// Table engine clause appended after the column list.
///
/// Displays as `Engine=<engine>(<key_column>) order by <order_by>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub engine: String,
    pub key_column: String,
    pub order_by: String,
}

impl Default for EngineSpec {
    fn default() -> Self {
        Self {
            engine: "ReplacingMergeTree".to_string(),
            key_column: "I_ID".to_string(),
            order_by: "I_ID".to_string(),
        }
    }
}

impl std::fmt::Display for EngineSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Engine={}({}) order by {}",
            self.engine, self.key_column, self.order_by
        )
    }
}

impl EngineSpec {
    /// Builder method to set the engine name.
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Builder method to set the engine key column.
    pub fn with_key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = key_column.into();
        self
    }

    /// Builder method to set the `order by` expression.
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }
}

/// What to do with a column whose type has no mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Emit an empty type token, as older output did
    #[default]
    Legacy,
    /// Leave the column out of the statement
    Skip,
    /// Refuse to render the table
    Fail,
}

impl std::fmt::Display for UnmappedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Skip => write!(f, "skip"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for UnmappedPolicy {
    type Err = Mysql2ChError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(Mysql2ChError::configuration(format!(
                "unknown unmapped policy '{}' (expected legacy, skip or fail)",
                other
            ))),
        }
    }
}

/// One column ready to be written into a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedColumn {
    pub name: String,
    pub target_type: TargetType,
    pub comment: String,
}

/// Builds the statement text from already-resolved columns.
///
/// Columns are joined by `", \n"`; the last one has no trailing comma. An
/// empty column list still produces the surrounding statement.
///
/// # Example
/// ```rust
/// use mysql2ch_core::ddl::{EngineSpec, RenderedColumn, TargetType, render_create_table};
///
/// let columns = [RenderedColumn {
///     name: "id".to_string(),
///     target_type: TargetType::new("Int32", false),
///     comment: String::new(),
/// }];
/// let ddl = render_create_table("t", &columns, &EngineSpec::default());
/// assert_eq!(
///     ddl,
///     "CREATE TABLE `t` (\n`id` Int32 comment ''\n) Engine=ReplacingMergeTree(I_ID) order by I_ID"
/// );
/// ```
pub fn render_create_table(
    table_name: &str,
    columns: &[RenderedColumn],
    engine: &EngineSpec,
) -> String {
    let definitions = columns
        .iter()
        .map(|column| {
            format!(
                "`{}` {} comment '{}'",
                column.name, column.target_type, column.comment
            )
        })
        .collect::<Vec<_>>()
        .join(", \n");

    format!(
        "CREATE TABLE `{}` (\n{}\n) {}",
        table_name, definitions, engine
    )
}

/// A rendered statement plus the columns that had no mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub ddl: String,
    /// Columns rendered with the legacy empty token or skipped
    pub unmapped: Vec<UnmappedType>,
}

/// Maps and renders whole tables.
#[derive(Debug, Clone, Default)]
pub struct DdlRenderer {
    mapping: TypeMapping,
    engine: EngineSpec,
    unmapped_policy: UnmappedPolicy,
}

impl DdlRenderer {
    pub fn new(mapping: TypeMapping) -> Self {
        Self {
            mapping,
            ..Default::default()
        }
    }

    /// Builder method to set the engine clause.
    pub fn with_engine(mut self, engine: EngineSpec) -> Self {
        self.engine = engine;
        self
    }

    /// Builder method to set the unmapped type policy.
    pub const fn with_unmapped_policy(mut self, policy: UnmappedPolicy) -> Self {
        self.unmapped_policy = policy;
        self
    }

    pub const fn engine(&self) -> &EngineSpec {
        &self.engine
    }

    pub const fn unmapped_policy(&self) -> UnmappedPolicy {
        self.unmapped_policy
    }

    /// Renders one table in column order.
    ///
    /// # Errors
    /// Only under [`UnmappedPolicy::Fail`]: returns every column whose type
    /// has no mapping, in column order.
    pub fn render(
        &self,
        table: &TableDescriptor,
    ) -> std::result::Result<RenderedTable, Vec<UnmappedType>> {
        let mut columns = Vec::with_capacity(table.columns.len());
        let mut unmapped = Vec::new();

        for column in &table.columns {
            let target_type = match self.mapping.map_column(column) {
                Ok(target_type) => target_type,
                Err(gap) => {
                    let fallback = gap.legacy_fallback();
                    unmapped.push(gap);
                    if self.unmapped_policy != UnmappedPolicy::Legacy {
                        continue;
                    }
                    fallback
                }
            };

            columns.push(RenderedColumn {
                name: column.name.clone(),
                target_type,
                comment: column.comment.clone(),
            });
        }

        if self.unmapped_policy == UnmappedPolicy::Fail && !unmapped.is_empty() {
            return Err(unmapped);
        }

        Ok(RenderedTable {
            ddl: render_create_table(&table.name, &columns, &self.engine),
            unmapped,
        })
    }
}
