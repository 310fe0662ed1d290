//! # caseflow_api
//!
//! HTTP API library for Caseflow.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, comm_logs, customers, reports, root, tickets};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `caseflow_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    caseflow_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/", get(root::root))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler));

    // Protected routes: everything behind the identity resolver.
    let protected = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/customers",
            get(customers::list_customers_handler).post(customers::create_customer_handler),
        )
        .route(
            "/customers/{id}",
            get(customers::get_customer_handler)
                .patch(customers::update_customer_handler)
                .delete(customers::delete_customer_handler),
        )
        .route(
            "/tickets",
            get(tickets::list_tickets_handler).post(tickets::create_ticket_handler),
        )
        .route(
            "/tickets/{id}",
            get(tickets::get_ticket_handler)
                .patch(tickets::update_ticket_handler)
                .delete(tickets::delete_ticket_handler),
        )
        .route(
            "/logs",
            get(comm_logs::list_logs_handler).post(comm_logs::create_log_handler),
        )
        .route(
            "/logs/{id}",
            get(comm_logs::get_log_handler)
                .patch(comm_logs::update_log_handler)
                .delete(comm_logs::delete_log_handler),
        )
        .route("/reports/tickets-summary", get(reports::tickets_summary_handler))
        .route("/reports/agent-workload", get(reports::agent_workload_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
