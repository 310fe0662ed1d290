//! Identity resolver — the per-request gate on every protected route.
//!
//! Presented → Decoded → Looked-up → Active → Authorized, with a failure
//! edge from every stage. Failures are terminal for the request; the caller
//! re-authenticates to proceed.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use caseflow_core::auth::{jwt, queries};
use caseflow_core::models::auth::User;

use crate::AppState;
use crate::error::AppError;

/// Verified caller identity, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Axum middleware: extracts `Authorization: Bearer <token>`, decodes the
/// token, resolves the subject to a live user record, and checks the active
/// flag before letting the request through.
///
/// Every token failure collapses to the same 401; the rejection kind is
/// logged but never exposed. An inactive account is the one distinct denial.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;

    let claims =
        jwt::decode_token(token, state.config.jwt_secret.as_bytes()).map_err(|kind| {
            debug!(%kind, "rejecting token");
            AppError::Unauthorized("Could not validate credentials".into())
        })?;

    // The subject may have been deleted after the token was issued.
    let record = queries::find_user_by_username(&state.pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;

    if !record.is_active {
        return Err(AppError::Inactive);
    }

    request
        .extensions_mut()
        .insert(CurrentUser(record.into_user()));

    Ok(next.run(request).await)
}
