#![allow(dead_code)]

use model::{
    core::value::Value,
    filter::{FieldFilter, Filter},
};
use planner::CompiledQuery;

/// Values that would change the statement if they reached the SQL text.
pub const HOSTILE_VALUES: &[&str] = &[
    "'; DROP TABLE users; --",
    "1 OR 1=1",
    "Robert'); DELETE FROM students;--",
    "\" OR \"\" = \"",
    "%_\\",
];

/// A filter nested `groups` logical groups deep, alternating AND/OR/NOT.
/// Its depth is `groups + 1`.
pub fn nested_filter(groups: usize) -> Filter {
    (0..groups).fold(Filter::new().field("leaf", 1), |inner, level| match level % 3 {
        0 => Filter::new().and([inner]),
        1 => Filter::new().or([inner, Filter::new().field("alt", level as i64)]),
        _ => Filter::new().not(inner),
    })
}

/// Same field constrained at several depths.
pub fn repeated_field_filter(field: &str) -> Filter {
    Filter::new()
        .field(field, 1)
        .or([
            Filter::new().field(field, FieldFilter::between(2, 3)),
            Filter::new().not(
                Filter::new().field(field, FieldFilter::in_list([Value::Int(4), Value::Int(5)])),
            ),
        ])
        .field(field, FieldFilter::contains("x").case_insensitive())
}

/// Number of placeholders for positional question style.
pub fn question_marks(sql: &str) -> usize {
    sql.matches('?').count()
}

pub fn param_names(query: &CompiledQuery) -> Vec<String> {
    query.params.names().map(String::from).collect()
}

pub fn assert_prefix(query: &CompiledQuery, prefix: &str) {
    assert!(
        query.sql.starts_with(prefix),
        "expected `{}` to start with `{prefix}`",
        query.sql
    );
}
