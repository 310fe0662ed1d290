//! API server configuration.

use caseflow_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret. Set once at startup; rotating it invalidates
    /// every outstanding token.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable       | Default                                  |
    /// |----------------|------------------------------------------|
    /// | `BIND_ADDR`    | `127.0.0.1:8000`                         |
    /// | `DATABASE_URL` | `postgres://localhost:5432/caseflow`     |
    /// | `JWT_SECRET`   | generated & persisted to the data dir    |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/caseflow".into()),
            jwt_secret: resolve_jwt_secret(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_reads_the_documented_variables() {
        // Safety: test-only env mutation; nothing else in this test binary
        // reads these variables.
        unsafe {
            std::env::set_var("BIND_ADDR", "0.0.0.0:9999");
            std::env::set_var("DATABASE_URL", "postgres://db.internal:5432/caseflow");
            std::env::set_var("JWT_SECRET", "from-env-test-secret");
        }
        let config = ApiConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:9999");
        assert_eq!(config.database_url, "postgres://db.internal:5432/caseflow");
        assert_eq!(config.jwt_secret, "from-env-test-secret");
        unsafe {
            std::env::remove_var("BIND_ADDR");
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("JWT_SECRET");
        }
    }
}
