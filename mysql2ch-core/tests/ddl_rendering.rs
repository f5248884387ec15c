//! DDL rendering tests.
//!
//! This test suite covers:
//! - Integer width selection by numeric precision
//! - Nullable wrapping
//! - Column order and separators
//! - The exact statement layout downstream consumers rely on

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use mysql2ch_core::{
    ColumnDescriptor, DdlRenderer, EngineSpec, TableDescriptor, TypeMapping, UnmappedPolicy,
    ddl::integer_type_for_precision,
};
use proptest::prelude::*;

const ENGINE: &str = ") Engine=ReplacingMergeTree(I_ID) order by I_ID";

fn width_rank(clickhouse_type: &str) -> Option<usize> {
    ["Int8", "Int16", "Int32", "Int64"]
        .iter()
        .position(|width| *width == clickhouse_type)
}

fn render(table: &TableDescriptor) -> String {
    DdlRenderer::default().render(table).unwrap().ddl
}

#[test]
fn test_integer_precision_boundaries() {
    let mapping = TypeMapping::default();
    let cases = [
        (0, "Int8"),
        (8, "Int8"),
        (9, "Int16"),
        (16, "Int16"),
        (17, "Int32"),
        (32, "Int32"),
        (33, "Int64"),
        (64, "Int64"),
        (65, "Int64"),
    ];

    for (precision, expected) in cases {
        let column = ColumnDescriptor::new("n", "integer").with_precision(precision);
        assert_eq!(
            mapping.map_column(&column).unwrap().base,
            expected,
            "precision {}",
            precision
        );
    }
}

proptest! {
    #[test]
    fn integer_width_is_monotonic(a in any::<u32>(), b in any::<u32>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_rank = width_rank(integer_type_for_precision(low));
        let high_rank = width_rank(integer_type_for_precision(high));
        prop_assert!(low_rank.is_some() && high_rank.is_some());
        prop_assert!(low_rank <= high_rank);
    }

    #[test]
    fn nullable_wrapping_is_uniform(nullable in any::<bool>(), precision in 0u32..128) {
        let mapping = TypeMapping::default();
        let column = ColumnDescriptor::new("n", "integer")
            .with_precision(precision)
            .nullable(nullable);
        let base = integer_type_for_precision(precision);
        let rendered = mapping.map_column(&column).unwrap().to_string();
        if nullable {
            prop_assert_eq!(rendered, format!("Nullable({})", base));
        } else {
            prop_assert_eq!(rendered, base);
        }
    }
}

#[test]
fn test_orders_scenario() {
    let table = TableDescriptor::new(
        "orders",
        vec![
            ColumnDescriptor::new("id", "int").with_precision(10),
            ColumnDescriptor::new("name", "varchar")
                .with_comment("cust name")
                .nullable(true),
        ],
    );

    let expected = "CREATE TABLE `orders` (\n\
                    `id` Int32 comment '', \n\
                    `name` Nullable(String) comment 'cust name'\n\
                    ) Engine=ReplacingMergeTree(I_ID) order by I_ID";
    assert_eq!(render(&table), expected);
}

#[test]
fn test_column_order_is_preserved() {
    let table = TableDescriptor::new(
        "t",
        vec![
            ColumnDescriptor::new("C", "varchar"),
            ColumnDescriptor::new("A", "bigint"),
            ColumnDescriptor::new("B", "datetime"),
        ],
    );

    let expected = format!(
        "CREATE TABLE `t` (\n`C` String comment '', \n`A` UInt64 comment '', \n`B` DateTime comment ''\n{}",
        ENGINE
    );
    assert_eq!(render(&table), expected);
}

#[test]
fn test_single_column_has_no_trailing_comma() {
    let table = TableDescriptor::new("t", vec![ColumnDescriptor::new("flag", "tinyint")]);
    let ddl = render(&table);

    assert_eq!(
        ddl,
        format!("CREATE TABLE `t` (\n`flag` UInt8 comment ''\n{}", ENGINE)
    );
    assert!(!ddl.contains(','));
}

#[test]
fn test_unmapped_type_renders_empty_token() {
    let table = TableDescriptor::new(
        "t",
        vec![
            ColumnDescriptor::new("price", "decimal"),
            ColumnDescriptor::new("note", "text").nullable(true),
        ],
    );

    let rendered = DdlRenderer::default().render(&table).unwrap();
    assert_eq!(
        rendered.ddl,
        format!(
            "CREATE TABLE `t` (\n`price`  comment '', \n`note` Nullable() comment ''\n{}",
            ENGINE
        )
    );
    let declared: Vec<_> = rendered
        .unmapped
        .iter()
        .map(|gap| gap.declared_type.as_str())
        .collect();
    assert_eq!(declared, ["decimal", "text"]);
}

#[test]
fn test_configured_engine_and_overrides() {
    let mapping = TypeMapping::default()
        .with_override("decimal=Decimal(18, 4)")
        .unwrap();
    let renderer = DdlRenderer::new(mapping)
        .with_engine(
            EngineSpec::default()
                .with_key_column("updated_at")
                .with_order_by("id"),
        )
        .with_unmapped_policy(UnmappedPolicy::Fail);

    let table = TableDescriptor::new(
        "prices",
        vec![
            ColumnDescriptor::new("id", "bigint"),
            ColumnDescriptor::new("amount", "decimal").nullable(true),
        ],
    );

    assert_eq!(
        renderer.render(&table).unwrap().ddl,
        "CREATE TABLE `prices` (\n`id` UInt64 comment '', \n`amount` Nullable(Decimal(18, 4)) comment ''\n) Engine=ReplacingMergeTree(updated_at) order by id"
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let table = TableDescriptor::new(
        "t",
        vec![
            ColumnDescriptor::new("a", "integer").with_precision(20),
            ColumnDescriptor::new("b", "varchar").with_comment("x"),
        ],
    );
    assert_eq!(render(&table), render(&table));
}
