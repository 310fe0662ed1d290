//! Authentication service — login/register flows delegating to `caseflow_core::auth`.

use std::sync::LazyLock;

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use caseflow_core::auth::{jwt, password, queries};
use caseflow_core::models::auth::{User, UserRecord};

use crate::error::{AppError, AppResult};

/// Successful-login response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Well-formed digest verified against on the unknown-username path, so that
/// failure takes the same bcrypt work as a wrong password.
///
/// bcrypt::hash only fails for an out-of-range cost, which is fixed here.
static PAD_DIGEST: LazyLock<String> =
    LazyLock::new(|| password::hash_password("caseflow-pad").unwrap_or_default());

/// Validate a username/password pair against the credential store.
///
/// Unknown username and wrong password are indistinguishable: both come back
/// as `None`, and both paths pay for a full digest verification so neither
/// can be told apart by response latency.
pub async fn authenticate(
    pool: &PgPool,
    username: &str,
    pw: &str,
) -> AppResult<Option<UserRecord>> {
    let record = match queries::find_user_by_username(pool, username).await? {
        None => {
            let _ = password::verify_password(pw, &PAD_DIGEST);
            return Ok(None);
        }
        Some(r) => r,
    };
    if !password::verify_password(pw, &record.password_hash) {
        return Ok(None);
    }
    Ok(Some(record))
}

/// Authenticate and issue a bearer token (30-minute lifetime).
pub async fn login(
    pool: &PgPool,
    username: &str,
    pw: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let record = authenticate(pool, username, pw)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Incorrect username or password".into()))?;

    let access_token = jwt::issue_default_token(&record.username, jwt_secret)?;
    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    })
}

/// Register a new user account with a hashed password.
///
/// Username and email must both be unused; either duplicate is a conflict.
pub async fn register(
    pool: &PgPool,
    username: &str,
    email: &str,
    pw: &str,
    role: &str,
) -> AppResult<User> {
    if queries::username_exists(pool, username).await? {
        return Err(AppError::Conflict("Username already registered".into()));
    }
    if queries::email_exists(pool, email).await? {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let pw_hash = password::hash_password(pw)?;
    let user = queries::create_user(pool, username, email, &pw_hash, role).await?;
    info!(username, role, "registered new user");
    Ok(user)
}
