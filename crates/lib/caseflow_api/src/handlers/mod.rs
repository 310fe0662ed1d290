//! Request handlers.

use serde::Deserialize;

pub mod auth;
pub mod comm_logs;
pub mod customers;
pub mod reports;
pub mod root;
pub mod tickets;

/// Common pagination query params for list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Requested page size, defaulting to 100. Negative values would reach
    /// Postgres as `LIMIT -n` and error, so they clamp to zero.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).max(0)
    }

    /// Requested page start, defaulting to 0, clamped to non-negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
