//! # caseflow_core
//!
//! Core domain logic for Caseflow.

pub mod auth;
pub mod comm_logs;
pub mod customers;
pub mod migrate;
pub mod models;
pub mod reports;
pub mod tickets;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
