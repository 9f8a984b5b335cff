use serde::{Deserialize, Serialize};

/// Requested page, one-based. Both fields fall back to configured defaults.
///
/// Values are signed so that out-of-range input (`page: 0`, `perPage: -5`)
/// reaches the compiler and is rejected there with a precise message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn page(page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

/// The validated result of pagination: rows to skip and rows to return.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}
