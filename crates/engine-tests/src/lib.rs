#![allow(dead_code)]

use model::{pagination::limits::CompileLimits, request::CompileRequest};
use planner::{CompileError, CompiledQuery, QueryCompiler};

pub mod utils;

/// Decodes a JSON request; panics on malformed fixtures.
pub fn request(json: &str) -> CompileRequest {
    serde_json::from_str(json).unwrap_or_else(|err| panic!("invalid request fixture: {err}"))
}

/// Compiles against the built-in limits, independent of the environment.
pub fn compile(request: &CompileRequest) -> Result<CompiledQuery, CompileError> {
    QueryCompiler::new(CompileLimits::default()).compile(request)
}

pub fn compile_json(json: &str) -> CompiledQuery {
    compile(&request(json)).unwrap_or_else(|err| panic!("compile failed: {err}"))
}

pub fn compile_with_depth(
    request: &CompileRequest,
    max_filter_depth: usize,
) -> Result<CompiledQuery, CompileError> {
    QueryCompiler::new(CompileLimits {
        max_filter_depth,
        ..CompileLimits::default()
    })
    .compile(request)
}
