//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use orderdesk_core::types::pagination::{DEFAULT_LIMIT, PageRequest};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Rows to skip (default: 0).
    #[serde(default)]
    pub offset: u64,
    /// Rows to return (default: 20, max: 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl PaginationParams {
    /// Converts to a `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.offset, self.limit)
    }
}
