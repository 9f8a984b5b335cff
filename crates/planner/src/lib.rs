pub mod error;
pub mod query;

pub use error::{CompileError, PaginationError};
pub use query::{CompiledQuery, QueryCompiler, compile};
