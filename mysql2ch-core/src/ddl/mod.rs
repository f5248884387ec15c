//! ClickHouse DDL generation.
//!
//! # Module Structure
//! - `type_mapping`: source type to ClickHouse type resolution
//! - `render`: statement assembly and the unmapped-type policy

pub mod render;
pub mod type_mapping;

pub use render::{
    DdlRenderer, EngineSpec, RenderedColumn, RenderedTable, UnmappedPolicy, render_create_table,
};
pub use type_mapping::{
    DEFAULT_INTEGER_FAMILY, DEFAULT_TYPE_TABLE, TargetType, TypeMapping, UnmappedType,
    integer_type_for_precision,
};
