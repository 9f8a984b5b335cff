use model::filter::LogicalOperator;
use thiserror::Error;

/// Errors raised while validating a pagination request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1, got {page}")]
    PageBelowMinimum { page: i64 },

    #[error("perPage must be at least 1, got {per_page}")]
    PerPageBelowMinimum { per_page: i64 },

    #[error("perPage must not exceed {max}, got {per_page}")]
    PerPageAboveMaximum { per_page: i64, max: u32 },

    /// `(page - 1) * perPage` does not fit in a signed 64-bit offset.
    #[error("offset for page {page} with perPage {per_page} is out of range")]
    OffsetOverflow { page: i64, per_page: i64 },
}

/// Top-level errors for query compilation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Logical groups are nested deeper than the configured limit.
    #[error("Filter nesting exceeds the maximum depth of {max} at {op} group")]
    FilterDepthExceeded { max: usize, op: LogicalOperator },

    #[error("Invalid pagination: {0}")]
    InvalidPagination(#[from] PaginationError),
}
