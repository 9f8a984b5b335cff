//! Per-field clause strategies.
//!
//! Each field constraint is matched against a fixed set of shapes, in
//! priority order, and the first match renders its clause. Logical groups
//! are handled by the filter walk itself.

use crate::query::{
    filter::column::{Column, lower},
    operator::SqlOperator,
    renderer::Renderer,
};
use model::{
    core::value::Value,
    filter::{FieldFilter, FieldOperator, FilterValue},
};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Contains,
    StartsWith,
    EndsWith,
}

impl PatternKind {
    pub fn pattern(&self, text: &str) -> String {
        match self {
            PatternKind::Contains => format!("%{text}%"),
            PatternKind::StartsWith => format!("{text}%"),
            PatternKind::EndsWith => format!("%{text}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy<'f> {
    /// `field IS NULL` / `field IS NOT NULL`.
    Null { column: Column<'f>, negated: bool },
    /// `field IN (...)` / `field NOT IN (...)`.
    Array {
        column: Column<'f>,
        values: &'f [Value],
        negated: bool,
        case_insensitive: bool,
    },
    /// Bare scalar equality.
    Primitive { column: Column<'f>, value: &'f Value },
    Comparison {
        column: Column<'f>,
        op: SqlOperator,
        value: &'f Value,
        case_insensitive: bool,
    },
    Pattern {
        column: Column<'f>,
        kind: PatternKind,
        value: &'f Value,
        case_insensitive: bool,
    },
    Range {
        column: Column<'f>,
        lo: &'f Value,
        hi: &'f Value,
        case_insensitive: bool,
    },
}

impl<'f> Strategy<'f> {
    /// Picks the strategy for a field constraint, or `None` when the
    /// constraint carries no recognized operator.
    pub fn classify(name: &'f str, value: &'f FilterValue) -> Option<Self> {
        let bare = Column::new(name, None);
        match value {
            FilterValue::Scalar(Value::Null) => Some(Strategy::Null {
                column: bare,
                negated: false,
            }),
            FilterValue::List(values) => Some(Strategy::Array {
                column: bare,
                values,
                negated: false,
                case_insensitive: false,
            }),
            FilterValue::Scalar(value) => Some(Strategy::Primitive {
                column: bare,
                value,
            }),
            FilterValue::Field(filter) => Self::classify_field(name, filter),
        }
    }

    fn classify_field(name: &'f str, filter: &'f FieldFilter) -> Option<Self> {
        let column = Column::new(name, filter.collection.as_deref());
        let case_insensitive = filter.case_insensitive;
        let op = filter.operator.as_ref()?;

        let strategy = match op {
            FieldOperator::In(values) | FieldOperator::Nin(values) => Strategy::Array {
                column,
                values,
                negated: matches!(op, FieldOperator::Nin(_)),
                case_insensitive,
            },
            FieldOperator::Eq(Value::Null) => Strategy::Null {
                column,
                negated: false,
            },
            FieldOperator::Neq(Value::Null) => Strategy::Null {
                column,
                negated: true,
            },
            FieldOperator::Eq(value)
            | FieldOperator::Neq(value)
            | FieldOperator::Lt(value)
            | FieldOperator::Lte(value)
            | FieldOperator::Gt(value)
            | FieldOperator::Gte(value) => Strategy::Comparison {
                column,
                op: SqlOperator::of(op),
                value,
                case_insensitive,
            },
            FieldOperator::Contains(value) => Strategy::Pattern {
                column,
                kind: PatternKind::Contains,
                value,
                case_insensitive,
            },
            FieldOperator::StartsWith(value) => Strategy::Pattern {
                column,
                kind: PatternKind::StartsWith,
                value,
                case_insensitive,
            },
            FieldOperator::EndsWith(value) => Strategy::Pattern {
                column,
                kind: PatternKind::EndsWith,
                value,
                case_insensitive,
            },
            FieldOperator::Between(lo, hi) => Strategy::Range {
                column,
                lo,
                hi,
                case_insensitive,
            },
        };
        Some(strategy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Null { .. } => "null",
            Strategy::Array { .. } => "array",
            Strategy::Primitive { .. } => "primitive",
            Strategy::Comparison { .. } => "comparison",
            Strategy::Pattern { .. } => "pattern",
            Strategy::Range { .. } => "range",
        }
    }

    /// Renders the clause, binding values through `renderer`. Returns
    /// `None` when the constraint produces no clause.
    pub fn render(self, renderer: &mut Renderer) -> Option<String> {
        match self {
            Strategy::Null { column, negated } => {
                let keyword = if negated { "IS NOT NULL" } else { "IS NULL" };
                Some(format!("{column} {keyword}"))
            }

            Strategy::Array {
                column,
                values,
                negated,
                case_insensitive,
            } => {
                if values.is_empty() {
                    // An empty set matches nothing; excluding it filters nothing.
                    return (!negated).then(|| "1 = 0".to_string());
                }

                let fold = case_insensitive && values.iter().any(Value::is_textual);
                let placeholders = values
                    .iter()
                    .map(|v| bind(renderer, column.field, v.clone(), fold && v.is_textual()))
                    .collect::<Vec<_>>()
                    .join(", ");
                let op = if negated { SqlOperator::NotIn } else { SqlOperator::In };

                Some(format!(
                    "{} {} ({placeholders})",
                    column.expr(fold),
                    op.keyword()
                ))
            }

            Strategy::Primitive { column, value } => {
                let placeholder = renderer.add_param(column.field, value.clone());
                Some(format!("{column} {} {placeholder}", SqlOperator::Eq.keyword()))
            }

            Strategy::Comparison {
                column,
                op,
                value,
                case_insensitive,
            } => {
                let fold = case_insensitive && value.is_textual();
                let placeholder = bind(renderer, column.field, value.clone(), fold);
                Some(format!("{} {} {placeholder}", column.expr(fold), op.keyword()))
            }

            Strategy::Pattern {
                column,
                kind,
                value,
                case_insensitive,
            } => {
                let Some(text) = value.as_string() else {
                    warn!(
                        "Skipping pattern filter on `{column}`: {} value cannot be matched as text",
                        value.type_name()
                    );
                    return None;
                };

                let fold = case_insensitive && value.is_textual();
                let pattern = Value::String(kind.pattern(&text));
                let placeholder = bind(renderer, column.field, pattern, fold);
                Some(format!(
                    "{} {} {placeholder}",
                    column.expr(fold),
                    SqlOperator::Like.keyword()
                ))
            }

            Strategy::Range {
                column,
                lo,
                hi,
                case_insensitive,
            } => {
                let fold = case_insensitive && (lo.is_textual() || hi.is_textual());
                let lo_placeholder = bind(renderer, column.field, lo.clone(), fold && lo.is_textual());
                let hi_placeholder = bind(renderer, column.field, hi.clone(), fold && hi.is_textual());
                Some(format!(
                    "{} {} {lo_placeholder} AND {hi_placeholder}",
                    column.expr(fold),
                    SqlOperator::Between.keyword()
                ))
            }
        }
    }
}

fn bind(renderer: &mut Renderer, field: &str, value: Value, fold: bool) -> String {
    let placeholder = renderer.add_param(field, value);
    if fold { lower(&placeholder) } else { placeholder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::bind_style::BindStyle;

    fn render(name: &str, value: FilterValue) -> (Option<String>, Vec<(String, Value)>) {
        let mut renderer = Renderer::for_style(BindStyle::Question);
        let clause = Strategy::classify(name, &value).and_then(|s| s.render(&mut renderer));
        (clause, renderer.finish().into_iter().collect())
    }

    #[test]
    fn test_priority() {
        let cases: Vec<(FilterValue, &str)> = vec![
            (FilterValue::Scalar(Value::Null), "null"),
            (FilterValue::List(vec![Value::Int(1)]), "array"),
            (FilterValue::from("John"), "primitive"),
            (FieldFilter::in_list([Value::Int(1)]).into(), "array"),
            (FieldFilter::eq(Value::Null).into(), "null"),
            (FieldFilter::gte(18).into(), "comparison"),
            (FieldFilter::contains("oh").into(), "pattern"),
            (FieldFilter::between(1, 2).into(), "range"),
        ];

        for (value, expected) in cases {
            let strategy = Strategy::classify("f", &value).unwrap();
            assert_eq!(strategy.name(), expected, "{value:?}");
        }
    }

    #[test]
    fn test_unrecognized_operator() {
        let value = FilterValue::Field(FieldFilter::default());
        assert!(Strategy::classify("f", &value).is_none());
    }

    #[test]
    fn test_null_degradation() {
        assert_eq!(
            render("deletedAt", FieldFilter::eq(Value::Null).into()).0.as_deref(),
            Some("deletedAt IS NULL")
        );

        let (clause, params) = render(
            "deletedAt",
            FieldFilter::neq(Value::Null).collection("users").into(),
        );
        assert_eq!(clause.as_deref(), Some("users.deletedAt IS NOT NULL"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_empty_membership() {
        assert_eq!(
            render("id", FieldFilter::in_list(Vec::new()).into()).0.as_deref(),
            Some("1 = 0")
        );
        assert_eq!(render("id", FieldFilter::not_in(Vec::new()).into()).0, None);
        assert_eq!(
            render("id", FilterValue::List(vec![])).0.as_deref(),
            Some("1 = 0")
        );
    }

    #[test]
    fn test_not_in() {
        let (clause, params) = render(
            "status",
            FieldFilter::not_in([Value::from("a"), Value::from("b")]).into(),
        );
        assert_eq!(clause.as_deref(), Some("status NOT IN (?, ?)"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_case_insensitive_comparison_ignores_non_text() {
        let (clause, _) = render("age", FieldFilter::gt(18).case_insensitive().into());
        assert_eq!(clause.as_deref(), Some("age > ?"));

        let (clause, _) = render("name", FieldFilter::neq("Bob").case_insensitive().into());
        assert_eq!(clause.as_deref(), Some("LOWER(name) <> LOWER(?)"));
    }

    #[test]
    fn test_patterns() {
        let (clause, params) = render("name", FieldFilter::contains("oh").into());
        assert_eq!(clause.as_deref(), Some("name LIKE ?"));
        assert_eq!(params[0].1, Value::from("%oh%"));

        let (_, params) = render("name", FieldFilter::starts_with("Jo").into());
        assert_eq!(params[0].1, Value::from("Jo%"));

        let (clause, params) = render("name", FieldFilter::ends_with("Doe").case_insensitive().into());
        assert_eq!(clause.as_deref(), Some("LOWER(name) LIKE LOWER(?)"));
        assert_eq!(params[0].1, Value::from("%Doe"));
    }

    #[test]
    fn test_case_insensitive_pattern_ignores_non_text() {
        let (clause, params) = render("code", FieldFilter::ends_with(42).case_insensitive().into());
        assert_eq!(clause.as_deref(), Some("code LIKE ?"));
        assert_eq!(params[0].1, Value::from("%42"));
    }

    #[test]
    fn test_pattern_on_bytes_is_dropped() {
        let (clause, params) = render("blob", FieldFilter::contains(vec![1u8, 2]).into());
        assert_eq!(clause, None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_range() {
        let (clause, params) = render("age", FieldFilter::between(18, 65).into());
        assert_eq!(clause.as_deref(), Some("age BETWEEN ? AND ?"));
        assert_eq!(params[0].0, "_1_age");
        assert_eq!(params[1].0, "_2_age");

        let (clause, params) = render("age", FieldFilter::between(30, 18).into());
        assert_eq!(clause.as_deref(), Some("age BETWEEN ? AND ?"));
        assert_eq!(params[0], ("_1_age".to_string(), Value::Int(30)));
        assert_eq!(params[1], ("_2_age".to_string(), Value::Int(18)));

        let (clause, _) = render("name", FieldFilter::between("a", 5).case_insensitive().into());
        assert_eq!(clause.as_deref(), Some("LOWER(name) BETWEEN LOWER(?) AND ?"));
    }
}
