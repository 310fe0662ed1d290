//! Aggregate report queries.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::PgPool;

/// Ticket counts by status.
#[derive(Debug, Clone, Serialize)]
pub struct TicketsSummary {
    pub total_tickets: i64,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

/// Count tickets in the three reported statuses. The total is the sum of
/// those three; other statuses (e.g. "closed") are not counted.
pub async fn tickets_summary(pool: &PgPool) -> Result<TicketsSummary, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM tickets \
         WHERE status IN ('open', 'in-progress', 'resolved') \
         GROUP BY status",
    )
    .fetch_all(pool)
    .await?;

    let mut summary = TicketsSummary {
        total_tickets: 0,
        open: 0,
        in_progress: 0,
        resolved: 0,
    };
    for (status, count) in rows {
        match status.as_str() {
            "open" => summary.open = count,
            "in-progress" => summary.in_progress = count,
            "resolved" => summary.resolved = count,
            _ => {}
        }
    }
    summary.total_tickets = summary.open + summary.in_progress + summary.resolved;
    Ok(summary)
}

/// Assigned-ticket count per agent username. LEFT JOIN so agents with no
/// tickets show up with a zero.
pub async fn agent_workload(pool: &PgPool) -> Result<BTreeMap<String, i64>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT u.username, COUNT(t.id) \
         FROM users u \
         LEFT JOIN tickets t ON t.assigned_agent_id = u.id \
         GROUP BY u.id, u.username",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().collect())
}
