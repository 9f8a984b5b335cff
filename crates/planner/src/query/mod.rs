use crate::{
    error::CompileError,
    query::{
        filter::{CompiledFilter, compile_filter},
        pagination::{compile_pagination, render_window},
        params::Params,
        sort::compile_sort,
    },
};
use engine_config::settings::global_limits;
use model::{
    core::bind_style::BindStyle,
    filter::Filter,
    pagination::{
        limits::CompileLimits,
        page::{PageWindow, Pagination},
    },
    request::CompileRequest,
    sort::Sort,
};
use serde::Serialize;
use tracing::debug;

pub mod dialect;
pub mod filter;
pub mod operator;
pub mod pagination;
pub mod params;
pub mod renderer;
pub mod sort;

/// The output of a full compile: SQL text plus its bound parameters.
///
/// `sql` holds the predicate, `ORDER BY`, `OFFSET` and `LIMIT` parts
/// separated by single spaces. The individual parts are kept for callers
/// that splice them into their own statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Params,
    #[serde(skip)]
    pub predicate: String,
    #[serde(skip)]
    pub order_by: String,
    #[serde(skip)]
    pub window: PageWindow,
}

impl CompiledQuery {
    /// `WHERE <predicate>`, or `None` when nothing is filtered.
    pub fn where_clause(&self) -> Option<String> {
        (!self.predicate.is_empty()).then(|| format!("WHERE {}", self.predicate))
    }

    /// The fragment with a `WHERE` keyword, ready to follow `SELECT ... FROM t`.
    pub fn statement_tail(&self) -> String {
        join_parts([
            self.where_clause().unwrap_or_default(),
            self.order_by.clone(),
            render_window(&self.window),
        ])
    }
}

fn join_parts<const N: usize>(parts: [String; N]) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compiles requests against a fixed set of limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCompiler {
    limits: CompileLimits,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(global_limits())
    }
}

impl QueryCompiler {
    pub fn new(limits: CompileLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &CompileLimits {
        &self.limits
    }

    pub fn compile(&self, request: &CompileRequest) -> Result<CompiledQuery, CompileError> {
        let CompiledFilter { sql: predicate, params } =
            self.compile_filter(request.filter.as_ref(), request.bind_style)?;
        let order_by = self.compile_sort(request.sort.as_ref());
        let window = self.compile_pagination(request.pagination.as_ref())?;

        let sql = join_parts([predicate.clone(), order_by.clone(), render_window(&window)]);

        debug!(
            "Compiled query with {} parameter(s) using {} placeholders: {sql}",
            params.len(),
            request.bind_style
        );

        Ok(CompiledQuery {
            sql,
            params,
            predicate,
            order_by,
            window,
        })
    }

    pub fn compile_filter(
        &self,
        filter: Option<&Filter>,
        style: BindStyle,
    ) -> Result<CompiledFilter, CompileError> {
        compile_filter(filter, style, self.limits.max_filter_depth)
    }

    pub fn compile_sort(&self, sort: Option<&Sort>) -> String {
        compile_sort(sort)
    }

    pub fn compile_pagination(
        &self,
        pagination: Option<&Pagination>,
    ) -> Result<PageWindow, CompileError> {
        Ok(compile_pagination(pagination, &self.limits)?)
    }
}

/// Compiles `request` with the process-wide limits.
pub fn compile(request: &CompileRequest) -> Result<CompiledQuery, CompileError> {
    QueryCompiler::default().compile(request)
}
