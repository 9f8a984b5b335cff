use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MAX_FILTER_DEPTH: usize = 10;

/// Bounds the compiler enforces on every request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompileLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Maximum nesting of logical groups; a flat filter has depth 1.
    pub max_filter_depth: usize,
}

impl Default for CompileLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            max_filter_depth: MAX_FILTER_DEPTH,
        }
    }
}
