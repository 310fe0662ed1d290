//! Root endpoint.

use axum::Json;

/// `GET /` — welcome message.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Welcome to Caseflow"}))
}
