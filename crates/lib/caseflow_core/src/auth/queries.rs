//! Credential-store queries.
//!
//! The auth core only ever needs lookup-by-username; uniqueness of username
//! and email is enforced here at write time (and by UNIQUE constraints),
//! never by the token layer.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::{User, UserRecord};

/// Fetch the full credential record for a username (exact match).
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRecord>, AuthError> {
    let row = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, email, password_hash, role, is_active \
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create a new user, returning the public profile.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: &str,
) -> Result<User, AuthError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, role) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, username, email, role, is_active",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

/// Check whether a username is already taken.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Check whether a user id refers to an existing user (for ticket assignment).
pub async fn user_exists(pool: &PgPool, user_id: i64) -> Result<bool, AuthError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
