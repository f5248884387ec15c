//! MySQL to ClickHouse type conversion.
//!
//! A [`TypeMapping`] is built once at startup and handed to the renderer.
//! Lookups return `Result<TargetType, UnmappedType>` so callers decide what
//! an unknown source type means for them.

use crate::error::Mysql2ChError;
use crate::models::ColumnDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Source type names whose width is chosen from the numeric precision.
pub const DEFAULT_INTEGER_FAMILY: &[&str] = &["integer"];

/// Fixed source-to-target table used when no overrides are given.
pub const DEFAULT_TYPE_TABLE: &[(&str, &str)] = &[
    ("bigint", "UInt64"),
    ("tinyint", "UInt8"),
    ("varchar", "String"),
    ("int", "Int32"),
    ("datetime", "DateTime"),
];

/// Picks a signed integer width from a numeric precision.
///
/// Total over `u32`: anything wider than 32 falls through to `Int64`.
///
/// # Example
/// ```rust
/// use mysql2ch_core::ddl::integer_type_for_precision;
///
/// assert_eq!(integer_type_for_precision(8), "Int8");
/// assert_eq!(integer_type_for_precision(9), "Int16");
/// assert_eq!(integer_type_for_precision(65), "Int64");
/// ```
pub const fn integer_type_for_precision(numeric_precision: u32) -> &'static str {
    match numeric_precision {
        0..=8 => "Int8",
        9..=16 => "Int16",
        17..=32 => "Int32",
        _ => "Int64",
    }
}

/// A resolved ClickHouse column type.
///
/// Displays as `Nullable(<base>)` for nullable columns and as the bare base
/// type otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetType {
    pub base: String,
    pub nullable: bool,
}

impl TargetType {
    pub fn new(base: impl Into<String>, nullable: bool) -> Self {
        Self {
            base: base.into(),
            nullable,
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nullable {
            write!(f, "Nullable({})", self.base)
        } else {
            f.write_str(&self.base)
        }
    }
}

/// A column whose declared type has no target mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("column '{column}' has unmapped type '{declared_type}'")]
pub struct UnmappedType {
    pub column: String,
    pub declared_type: String,
    pub nullable: bool,
}

impl UnmappedType {
    /// The empty type token older output used for unmapped columns.
    ///
    /// Nullability wrapping still applies, so a nullable column becomes
    /// `Nullable()`.
    pub fn legacy_fallback(&self) -> TargetType {
        TargetType::new(String::new(), self.nullable)
    }
}

/// Source type name to ClickHouse type name lookup.
///
/// # Example
/// ```rust
/// use mysql2ch_core::ddl::TypeMapping;
/// use mysql2ch_core::models::ColumnDescriptor;
///
/// let mapping = TypeMapping::default();
/// let column = ColumnDescriptor::new("name", "varchar").nullable(true);
///
/// let target = mapping.map_column(&column).unwrap();
/// assert_eq!(target.to_string(), "Nullable(String)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    entries: BTreeMap<String, String>,
    integer_family: BTreeSet<String>,
}

impl Default for TypeMapping {
    fn default() -> Self {
        Self::mysql_to_clickhouse()
    }
}

impl TypeMapping {
    /// A mapping with no entries and no integer family.
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            integer_family: BTreeSet::new(),
        }
    }

    /// The built-in MySQL to ClickHouse table.
    pub fn mysql_to_clickhouse() -> Self {
        let mapping = DEFAULT_TYPE_TABLE
            .iter()
            .fold(Self::empty(), |mapping, (source, target)| {
                mapping.with_entry(*source, *target)
            });
        DEFAULT_INTEGER_FAMILY
            .iter()
            .fold(mapping, |mapping, name| mapping.with_integer_family(*name))
    }

    /// Adds or replaces a table entry. Source names are case-insensitive.
    pub fn with_entry(mut self, source: impl AsRef<str>, target: impl Into<String>) -> Self {
        self.entries
            .insert(source.as_ref().to_lowercase(), target.into());
        self
    }

    /// Adds a source type name to the precision-sized integer family.
    pub fn with_integer_family(mut self, source: impl AsRef<str>) -> Self {
        self.integer_family.insert(source.as_ref().to_lowercase());
        self
    }

    /// Applies a `source=Target` override string.
    ///
    /// # Errors
    /// Returns a configuration error when either side is missing.
    pub fn with_override(self, raw: &str) -> crate::Result<Self> {
        let (source, target) = parse_override(raw)?;
        Ok(self.with_entry(source, target))
    }

    /// True when the declared type's width is chosen from its precision.
    pub fn is_integer_family(&self, declared_type: &str) -> bool {
        self.integer_family.contains(&declared_type.to_lowercase())
    }

    /// Looks up the static table only, ignoring the integer family rule.
    pub fn lookup(&self, declared_type: &str) -> Option<&str> {
        self.entries
            .get(&declared_type.to_lowercase())
            .map(String::as_str)
    }

    /// Number of static entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the static table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the target type for one column.
    ///
    /// # Errors
    /// Returns [`UnmappedType`] when the declared type is neither in the
    /// integer family nor in the static table.
    pub fn map_column(
        &self,
        column: &ColumnDescriptor,
    ) -> std::result::Result<TargetType, UnmappedType> {
        let base = if self.is_integer_family(&column.declared_type) {
            integer_type_for_precision(column.numeric_precision)
        } else {
            match self.lookup(&column.declared_type) {
                Some(base) => base,
                None => {
                    return Err(UnmappedType {
                        column: column.name.clone(),
                        declared_type: column.declared_type.clone(),
                        nullable: column.nullable,
                    });
                }
            }
        };

        Ok(TargetType::new(base, column.nullable))
    }
}

fn parse_override(raw: &str) -> crate::Result<(&str, &str)> {
    let (source, target) = raw.split_once('=').ok_or_else(|| {
        Mysql2ChError::configuration(format!(
            "type override '{}' must look like source=Target",
            raw
        ))
    })?;
    let (source, target) = (source.trim(), target.trim());
    if source.is_empty() || target.is_empty() {
        return Err(Mysql2ChError::configuration(format!(
            "type override '{}' has an empty side",
            raw
        )));
    }
    Ok((source, target))
}
