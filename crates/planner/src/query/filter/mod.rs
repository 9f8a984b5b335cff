//! Compiles a filter tree into a parenthesized predicate.
//!
//! Sibling entries are ANDed. Logical groups recurse with a depth guard so
//! that hostile input cannot exhaust the stack.

use crate::{
    error::CompileError,
    query::{
        filter::{column::is_single_group, strategy::Strategy},
        params::Params,
        renderer::Renderer,
    },
};
use model::{
    core::bind_style::BindStyle,
    filter::{Filter, FilterEntry, FilterValue, LogicalOperator},
};
use serde::Serialize;
use tracing::{trace, warn};

pub mod column;
pub mod strategy;

/// A compiled predicate. `sql` is empty when the filter constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledFilter {
    pub sql: String,
    pub params: Params,
}

impl CompiledFilter {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

pub struct FilterCompiler<'r, 'a> {
    renderer: &'r mut Renderer<'a>,
    max_depth: usize,
}

impl<'r, 'a> FilterCompiler<'r, 'a> {
    pub fn new(renderer: &'r mut Renderer<'a>, max_depth: usize) -> Self {
        Self {
            renderer,
            max_depth,
        }
    }

    /// Compiles `filter` and returns the predicate text, wrapped in a
    /// single pair of parentheses, or an empty string.
    pub fn compile(&mut self, filter: &Filter) -> Result<String, CompileError> {
        let clauses = self.compile_level(filter, 1)?;
        Ok(wrap_predicate(clauses))
    }

    fn compile_level(&mut self, filter: &Filter, depth: usize) -> Result<Vec<String>, CompileError> {
        let mut clauses = Vec::with_capacity(filter.len());

        for entry in filter.entries() {
            let clause = match entry {
                FilterEntry::Group { op, filters } => self.compile_group(*op, filters, depth)?,
                FilterEntry::Field { name, value: None } => {
                    trace!("Field `{name}` is unset, skipping");
                    None
                }
                FilterEntry::Field {
                    name,
                    value: Some(value),
                } => self.compile_field(name, value),
            };
            clauses.extend(clause);
        }

        Ok(clauses)
    }

    fn compile_group(
        &mut self,
        op: LogicalOperator,
        filters: &[Filter],
        depth: usize,
    ) -> Result<Option<String>, CompileError> {
        if filters.is_empty() {
            return Ok(None);
        }

        let child_depth = depth + 1;
        if child_depth > self.max_depth {
            return Err(CompileError::FilterDepthExceeded {
                max: self.max_depth,
                op,
            });
        }

        let mut children = Vec::with_capacity(filters.len());
        for filter in filters {
            let clauses = self.compile_level(filter, child_depth)?;
            if !clauses.is_empty() {
                children.push(clauses);
            }
        }

        if children.is_empty() {
            return Ok(None);
        }

        let clause = match op {
            LogicalOperator::And => {
                let clauses = children.concat();
                parenthesize_many(&clauses, " AND ")
            }
            LogicalOperator::Or => {
                // A child with several clauses keeps its own parentheses so
                // its ANDs bind tighter than the surrounding OR.
                let parts: Vec<String> = children
                    .iter()
                    .map(|clauses| parenthesize_many(clauses, " AND "))
                    .collect();
                parenthesize_many(&parts, " OR ")
            }
            LogicalOperator::Not => format!("NOT ({})", children.concat().join(" AND ")),
        };

        Ok(Some(clause))
    }

    fn compile_field(&mut self, name: &str, value: &FilterValue) -> Option<String> {
        let Some(strategy) = Strategy::classify(name, value) else {
            warn!("Skipping filter on `{name}`: no recognized operator");
            return None;
        };

        trace!("Field `{name}` uses the {} strategy", strategy.name());
        strategy.render(self.renderer)
    }
}

/// Compiles `filter` with a fresh parameter sequence.
pub fn compile_filter(
    filter: Option<&Filter>,
    style: BindStyle,
    max_depth: usize,
) -> Result<CompiledFilter, CompileError> {
    let mut renderer = Renderer::for_style(style);
    let sql = match filter {
        Some(filter) => FilterCompiler::new(&mut renderer, max_depth).compile(filter)?,
        None => String::new(),
    };

    Ok(CompiledFilter {
        sql,
        params: renderer.finish(),
    })
}

fn parenthesize_many(clauses: &[String], separator: &str) -> String {
    let joined = clauses.join(separator);
    if clauses.len() > 1 {
        format!("({joined})")
    } else {
        joined
    }
}

fn wrap_predicate(clauses: Vec<String>) -> String {
    if clauses.is_empty() {
        return String::new();
    }

    let joined = clauses.join(" AND ");
    if clauses.len() == 1 && is_single_group(&joined) {
        joined
    } else {
        format!("({joined})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use model::{
        core::value::Value,
        filter::FieldFilter,
        pagination::limits::MAX_FILTER_DEPTH,
    };

    fn compile(filter: &Filter) -> CompiledFilter {
        compile_filter(Some(filter), BindStyle::Question, MAX_FILTER_DEPTH).unwrap()
    }

    fn names(params: &Params) -> Vec<&str> {
        params.names().collect()
    }

    #[test]
    fn test_simple_equality() {
        let out = compile(&Filter::new().field("name", "John Doe"));
        assert_eq!(out.sql, "(name = ?)");
        assert_eq!(out.params.get("_1_name"), Some(&Value::from("John Doe")));
    }

    #[test]
    fn test_siblings_are_anded() {
        let out = compile(
            &Filter::new()
                .field("name", "John")
                .field("age", FieldFilter::gte(18)),
        );
        assert_eq!(out.sql, "(name = ? AND age >= ?)");
        assert_eq!(names(&out.params), vec!["_1_name", "_2_age"]);
    }

    #[test]
    fn test_not_group() {
        let inner = Filter::new()
            .field("age", FieldFilter::gte(18))
            .field("name", FieldFilter::eq("John"));
        let out = compile(&Filter::new().not(inner));
        assert_eq!(out.sql, "(NOT (age >= ? AND name = ?))");
        assert_eq!(names(&out.params), vec!["_1_age", "_2_name"]);
    }

    #[test]
    fn test_or_group_keeps_precedence() {
        let filter = Filter::new().or([
            Filter::new().field("a", 1).field("b", 2),
            Filter::new().field("c", 3),
        ]);
        assert_eq!(compile(&filter).sql, "((a = ? AND b = ?) OR c = ?)");
    }

    #[test]
    fn test_single_child_groups_are_not_wrapped_twice() {
        let filter = Filter::new().and([Filter::new().field("a", 1)]);
        assert_eq!(compile(&filter).sql, "(a = ?)");

        let filter = Filter::new().or([
            Filter::new().field("a", 1),
            Filter::new().field("b", 2),
        ]);
        assert_eq!(compile(&filter).sql, "(a = ? OR b = ?)");
    }

    #[test]
    fn test_group_beside_field() {
        let filter = Filter::new()
            .or([Filter::new().field("a", 1), Filter::new().field("b", 2)])
            .field("c", 3);
        assert_eq!(compile(&filter).sql, "((a = ? OR b = ?) AND c = ?)");
    }

    #[test]
    fn test_case_insensitive_mixed_list() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let filter = Filter::new().field(
            "tags",
            FieldFilter::in_list([
                Value::from("tag1"),
                Value::Int(1),
                Value::Boolean(false),
                Value::Date(date),
            ])
            .case_insensitive(),
        );

        let out = compile(&filter);
        assert_eq!(out.sql, "(LOWER(tags) IN (LOWER(?), ?, ?, ?))");
        assert_eq!(
            names(&out.params),
            vec!["_1_tags", "_2_tags", "_3_tags", "_4_tags"]
        );
        assert_eq!(out.params.get("_4_tags"), Some(&Value::Date(date)));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compile(&Filter::new()).is_empty());
        assert!(compile_filter(None, BindStyle::Dollar, 1).unwrap().is_empty());
        assert!(compile(&Filter::new().or(Vec::new())).is_empty());
        assert!(compile(&Filter::new().maybe_field("name", None::<&str>)).is_empty());
        assert!(compile(&Filter::new().field("name", FieldFilter::default())).is_empty());
    }

    #[test]
    fn test_unset_fields_do_not_consume_sequence() {
        let filter = Filter::new()
            .maybe_field("skip", None::<i64>)
            .field("keep", 1);
        let out = compile(&filter);
        assert_eq!(out.sql, "(keep = ?)");
        assert_eq!(names(&out.params), vec!["_1_keep"]);
    }

    #[test]
    fn test_dollar_placeholders_follow_binding_order() {
        let filter = Filter::new()
            .field("a", 1)
            .or([
                Filter::new().field("b", 2),
                Filter::new().field("c", FieldFilter::between(3, 4)),
            ]);
        let out = compile_filter(Some(&filter), BindStyle::Dollar, MAX_FILTER_DEPTH).unwrap();
        assert_eq!(out.sql, "(a = $1 AND (b = $2 OR c BETWEEN $3 AND $4))");
    }

    fn nested(levels: usize) -> Filter {
        (0..levels).fold(Filter::new().field("leaf", 1), |inner, _| Filter::new().and([inner]))
    }

    #[test]
    fn test_depth_limit() {
        // One group on top of a flat filter has depth 2.
        assert_eq!(nested(1).depth(), 2);
        assert!(compile_filter(Some(&nested(1)), BindStyle::Question, 2).is_ok());

        let err = compile_filter(Some(&nested(2)), BindStyle::Question, 2).unwrap_err();
        assert_eq!(
            err,
            CompileError::FilterDepthExceeded {
                max: 2,
                op: LogicalOperator::And
            }
        );
    }

    #[test]
    fn test_flat_filter_ignores_depth() {
        let filter = Filter::new().field("a", 1);
        let out = compile_filter(Some(&filter), BindStyle::Question, 1).unwrap();
        assert_eq!(out.sql, "(a = ?)");
    }

    #[test]
    fn test_empty_group_does_not_count_toward_depth() {
        let filter = Filter::new().and([Filter::new().or(Vec::new())]);
        assert!(compile_filter(Some(&filter), BindStyle::Question, 2).is_ok());
    }
}
