//! Communication-log request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use caseflow_core::comm_logs::{self, LogPatch, LogRow};
use caseflow_core::tickets;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::ListParams;

/// `POST /logs` body.
#[derive(Debug, Deserialize)]
pub struct CreateLog {
    #[serde(rename = "type")]
    pub log_type: String,
    pub content: String,
    pub ticket_id: i64,
}

/// `PATCH /logs/{id}` body — one optional field per mutable attribute.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateLog {
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub content: Option<String>,
    pub ticket_id: Option<i64>,
}

async fn validate_ticket(state: &AppState, ticket_id: i64) -> AppResult<()> {
    if !tickets::ticket_exists(&state.pool, ticket_id).await? {
        return Err(AppError::NotFound("Ticket not found".into()));
    }
    Ok(())
}

/// `GET /logs` — paginated list.
pub async fn list_logs_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<LogRow>>> {
    let rows = comm_logs::list_logs(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(rows))
}

/// `POST /logs` — create a log entry against an existing ticket.
pub async fn create_log_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateLog>,
) -> AppResult<(StatusCode, Json<LogRow>)> {
    validate_ticket(&state, body.ticket_id).await?;
    let row = comm_logs::create_log(&state.pool, &body.log_type, &body.content, body.ticket_id)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /logs/{id}` — fetch one log entry.
pub async fn get_log_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LogRow>> {
    let row = comm_logs::get_log(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Log not found".into()))?;
    Ok(Json(row))
}

/// `PATCH /logs/{id}` — partial update; the ticket is re-validated when moved.
pub async fn update_log_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateLog>,
) -> AppResult<Json<LogRow>> {
    if let Some(ticket_id) = body.ticket_id {
        validate_ticket(&state, ticket_id).await?;
    }
    let patch = LogPatch {
        log_type: body.log_type,
        content: body.content,
        ticket_id: body.ticket_id,
    };
    let row = comm_logs::update_log(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Log not found".into()))?;
    Ok(Json(row))
}

/// `DELETE /logs/{id}`.
pub async fn delete_log_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !comm_logs::delete_log(&state.pool, id).await? {
        return Err(AppError::NotFound("Log not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
