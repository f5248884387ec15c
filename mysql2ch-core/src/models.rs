//! Catalog metadata models.
//!
//! These are the values the resolver produces and the renderer consumes.
//! Neither type is mutated after construction.

use serde::{Deserialize, Serialize};

/// One column as described by the source catalog.
///
/// # Example
/// ```rust
/// use mysql2ch_core::models::ColumnDescriptor;
///
/// let column = ColumnDescriptor::new("name", "varchar")
///     .with_comment("cust name")
///     .nullable(true);
///
/// assert_eq!(column.declared_type, "varchar");
/// assert!(column.nullable);
/// assert_eq!(column.numeric_precision, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Source type name as reported by the catalog (`DATA_TYPE`)
    pub declared_type: String,
    /// Column comment, empty when the catalog has none
    pub comment: String,
    /// Numeric precision, 0 for non-numeric columns
    pub numeric_precision: u32,
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Creates a non-nullable column with no comment and zero precision.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            comment: String::new(),
            numeric_precision: 0,
            nullable: false,
        }
    }

    /// Builder method to set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Builder method to set the numeric precision.
    pub const fn with_precision(mut self, numeric_precision: u32) -> Self {
        self.numeric_precision = numeric_precision;
        self
    }

    /// Builder method to set nullability.
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// A table and its columns in catalog order.
///
/// The column order is the declared order of the rendered statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// A table with no columns, either missing from the catalog or unreadable.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
