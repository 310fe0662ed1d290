//! Support-ticket request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use caseflow_core::auth::queries;
use caseflow_core::customers;
use caseflow_core::tickets::{self, TicketPatch, TicketRow};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::ListParams;

/// `POST /tickets` body.
#[derive(Debug, Deserialize)]
pub struct CreateTicket {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub customer_id: i64,
    pub assigned_agent_id: Option<i64>,
}

fn default_priority() -> String {
    "medium".to_string()
}

fn default_status() -> String {
    "open".to_string()
}

/// `PATCH /tickets/{id}` body — one optional field per mutable attribute.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub customer_id: Option<i64>,
    pub assigned_agent_id: Option<i64>,
}

/// The ticket's foreign keys must point at live rows.
async fn validate_references(
    state: &AppState,
    customer_id: Option<i64>,
    assigned_agent_id: Option<i64>,
) -> AppResult<()> {
    if let Some(customer_id) = customer_id
        && !customers::customer_exists(&state.pool, customer_id).await?
    {
        return Err(AppError::NotFound("Customer not found".into()));
    }
    if let Some(agent_id) = assigned_agent_id
        && !queries::user_exists(&state.pool, agent_id).await?
    {
        return Err(AppError::NotFound("Assigned agent not found".into()));
    }
    Ok(())
}

/// `GET /tickets` — paginated list.
pub async fn list_tickets_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<TicketRow>>> {
    let rows = tickets::list_tickets(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(rows))
}

/// `POST /tickets` — create a ticket after validating its references.
pub async fn create_ticket_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateTicket>,
) -> AppResult<(StatusCode, Json<TicketRow>)> {
    validate_references(&state, Some(body.customer_id), body.assigned_agent_id).await?;
    let row = tickets::create_ticket(
        &state.pool,
        &body.title,
        body.description.as_deref(),
        &body.priority,
        &body.status,
        body.customer_id,
        body.assigned_agent_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /tickets/{id}` — fetch one ticket.
pub async fn get_ticket_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TicketRow>> {
    let row = tickets::get_ticket(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".into()))?;
    Ok(Json(row))
}

/// `PATCH /tickets/{id}` — partial update; references re-validated when changed.
pub async fn update_ticket_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTicket>,
) -> AppResult<Json<TicketRow>> {
    validate_references(&state, body.customer_id, body.assigned_agent_id).await?;
    let patch = TicketPatch {
        title: body.title,
        description: body.description,
        priority: body.priority,
        status: body.status,
        customer_id: body.customer_id,
        assigned_agent_id: body.assigned_agent_id,
    };
    let row = tickets::update_ticket(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".into()))?;
    Ok(Json(row))
}

/// `DELETE /tickets/{id}`.
pub async fn delete_ticket_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !tickets::delete_ticket(&state.pool, id).await? {
        return Err(AppError::NotFound("Ticket not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
