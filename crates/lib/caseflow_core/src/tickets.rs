//! Support-ticket persistence.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// Row returned by ticket queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TicketRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// low | medium | high | urgent (free text, "medium" default).
    pub priority: String,
    /// open | in-progress | resolved | closed (free text, "open" default).
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub customer_id: i64,
    pub assigned_agent_id: Option<i64>,
}

/// Field-by-field patch; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub customer_id: Option<i64>,
    pub assigned_agent_id: Option<i64>,
}

const COLUMNS: &str =
    "id, title, description, priority, status, created_at, customer_id, assigned_agent_id";

/// List tickets, oldest first.
pub async fn list_tickets(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<TicketRow>, sqlx::Error> {
    sqlx::query_as::<_, TicketRow>(&format!(
        "SELECT {COLUMNS} FROM tickets ORDER BY id LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Create a new ticket. Callers validate the customer and agent first.
pub async fn create_ticket(
    pool: &PgPool,
    title: &str,
    description: Option<&str>,
    priority: &str,
    status: &str,
    customer_id: i64,
    assigned_agent_id: Option<i64>,
) -> Result<TicketRow, sqlx::Error> {
    sqlx::query_as::<_, TicketRow>(&format!(
        "INSERT INTO tickets (title, description, priority, status, customer_id, assigned_agent_id) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
    ))
    .bind(title)
    .bind(description)
    .bind(priority)
    .bind(status)
    .bind(customer_id)
    .bind(assigned_agent_id)
    .fetch_one(pool)
    .await
}

/// Get a ticket by id.
pub async fn get_ticket(pool: &PgPool, id: i64) -> Result<Option<TicketRow>, sqlx::Error> {
    sqlx::query_as::<_, TicketRow>(&format!("SELECT {COLUMNS} FROM tickets WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Check whether a ticket id exists (for log validation).
pub async fn ticket_exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tickets WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Apply a patch to a ticket; absent fields keep their current value.
pub async fn update_ticket(
    pool: &PgPool,
    id: i64,
    patch: &TicketPatch,
) -> Result<Option<TicketRow>, sqlx::Error> {
    sqlx::query_as::<_, TicketRow>(&format!(
        "UPDATE tickets SET \
           title = COALESCE($2, title), \
           description = COALESCE($3, description), \
           priority = COALESCE($4, priority), \
           status = COALESCE($5, status), \
           customer_id = COALESCE($6, customer_id), \
           assigned_agent_id = COALESCE($7, assigned_agent_id) \
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(patch.title.as_deref())
    .bind(patch.description.as_deref())
    .bind(patch.priority.as_deref())
    .bind(patch.status.as_deref())
    .bind(patch.customer_id)
    .bind(patch.assigned_agent_id)
    .fetch_optional(pool)
    .await
}

/// Delete a ticket. Returns whether a row was removed.
pub async fn delete_ticket(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
