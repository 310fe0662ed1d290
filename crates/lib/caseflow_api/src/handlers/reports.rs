//! Report request handlers.

use axum::Json;
use axum::extract::State;

use caseflow_core::reports::{self, TicketsSummary};

use crate::AppState;
use crate::error::AppResult;

/// `GET /reports/tickets-summary` — ticket counts by status.
pub async fn tickets_summary_handler(
    State(state): State<AppState>,
) -> AppResult<Json<TicketsSummary>> {
    let summary = reports::tickets_summary(&state.pool).await?;
    Ok(Json(summary))
}

/// `GET /reports/agent-workload` — assigned-ticket counts per agent.
pub async fn agent_workload_handler(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let workload = reports::agent_workload(&state.pool).await?;
    Ok(Json(serde_json::json!({ "agent_workload": workload })))
}
