//! Communication-log persistence.
//!
//! Logs record customer interactions (calls, emails, chats) against a ticket.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// Row returned by log queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LogRow {
    pub id: i64,
    /// call | email | chat (free text).
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub log_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub ticket_id: i64,
}

/// Field-by-field patch; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct LogPatch {
    pub log_type: Option<String>,
    pub content: Option<String>,
    pub ticket_id: Option<i64>,
}

const COLUMNS: &str = "id, type, content, created_at, ticket_id";

/// List logs, oldest first.
pub async fn list_logs(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<LogRow>, sqlx::Error> {
    sqlx::query_as::<_, LogRow>(&format!(
        "SELECT {COLUMNS} FROM logs ORDER BY id LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Create a new log entry. Callers validate the ticket first.
pub async fn create_log(
    pool: &PgPool,
    log_type: &str,
    content: &str,
    ticket_id: i64,
) -> Result<LogRow, sqlx::Error> {
    sqlx::query_as::<_, LogRow>(&format!(
        "INSERT INTO logs (type, content, ticket_id) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
    ))
    .bind(log_type)
    .bind(content)
    .bind(ticket_id)
    .fetch_one(pool)
    .await
}

/// Get a log by id.
pub async fn get_log(pool: &PgPool, id: i64) -> Result<Option<LogRow>, sqlx::Error> {
    sqlx::query_as::<_, LogRow>(&format!("SELECT {COLUMNS} FROM logs WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Apply a patch to a log; absent fields keep their current value.
pub async fn update_log(
    pool: &PgPool,
    id: i64,
    patch: &LogPatch,
) -> Result<Option<LogRow>, sqlx::Error> {
    sqlx::query_as::<_, LogRow>(&format!(
        "UPDATE logs SET \
           type = COALESCE($2, type), \
           content = COALESCE($3, content), \
           ticket_id = COALESCE($4, ticket_id) \
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(patch.log_type.as_deref())
    .bind(patch.content.as_deref())
    .bind(patch.ticket_id)
    .fetch_optional(pool)
    .await
}

/// Delete a log entry. Returns whether a row was removed.
pub async fn delete_log(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM logs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
