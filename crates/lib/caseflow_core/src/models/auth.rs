//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// Public user profile, safe to return from the API.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Free-text role, `"agent"` by default. Not a closed enum.
    pub role: String,
    pub is_active: bool,
}

/// Full credential record, including the password digest. Never serialized;
/// the digest is only ever consumed by the password verifier.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
}

impl UserRecord {
    /// Strip the credential part, leaving the public profile.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — the username (standard JWT `sub` claim).
    pub sub: String,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}
