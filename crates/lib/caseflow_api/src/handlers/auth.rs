//! Authentication request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Form, Json};
use serde::Deserialize;

use caseflow_core::models::auth::User;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::services::auth::{self, TokenResponse};

/// `POST /auth/register` body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "agent".to_string()
}

/// `POST /auth/login` body (form-encoded, OAuth2 password style).
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /auth/register` — create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = auth::register(
        &state.pool,
        &body.username,
        &body.email,
        &body.password,
        &body.role,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login` — authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Form(body): Form<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(
        &state.pool,
        &body.username,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `GET /auth/me` — return the authenticated caller's profile.
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}
