//! JWT token codec: issuance and verification.
//!
//! Tokens are stateless — nothing is stored server-side, so the only way to
//! invalidate outstanding tokens early is rotating the signing secret.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use thiserror::Error;
use tracing::info;

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Default access-token lifetime: 30 minutes.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 30 * 60;

/// Reasons a token is rejected. Callers collapse all three to a single
/// "unauthorized" surface; the distinction exists for logging only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("bad signature")]
    BadSignature,

    #[error("token expired")]
    Expired,
}

/// Issue a signed JWT (HS256) asserting `subject` for `ttl`.
pub fn issue_token(subject: &str, ttl: Duration, secret: &[u8]) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: subject.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Issue a token with the default 30-minute lifetime.
pub fn issue_default_token(subject: &str, secret: &[u8]) -> Result<String, AuthError> {
    issue_token(subject, Duration::seconds(DEFAULT_TOKEN_TTL_SECS), secret)
}

/// Verify a token and return its claims.
///
/// Zero expiry leeway: a token is unusable the instant its expiry passes.
/// Decoding never mutates state and is safe to retry.
pub fn decode_token(token: &str, secret: &[u8]) -> Result<TokenClaims, TokenError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;
    match decode::<TokenClaims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => Err(match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            // Missing `sub`, truncated segments, bad base64, wrong algorithm —
            // all structurally unusable.
            _ => TokenError::Malformed,
        }),
    }
}

/// Resolve the JWT signing secret: env var `JWT_SECRET` → persisted file →
/// freshly generated. The secret is process-wide and immutable for the
/// process lifetime.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("caseflow")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    const SECRET: &[u8] = b"unit-test-secret";

    #[test]
    fn issue_then_decode_yields_subject() {
        let token = issue_token("alice", Duration::minutes(5), SECRET).expect("issue");
        let claims = decode_token(&token, SECRET).expect("decode");
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn default_ttl_is_thirty_minutes() {
        let token = issue_default_token("alice", SECRET).expect("issue");
        let claims = decode_token(&token, SECRET).expect("decode");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let token = issue_token("alice", Duration::seconds(-120), SECRET).expect("issue");
        assert_eq!(decode_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = issue_token("alice", Duration::minutes(5), SECRET).expect("issue");
        // Flip one character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().expect("nonempty");
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_eq!(decode_token(&tampered, SECRET), Err(TokenError::BadSignature));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token("alice", Duration::minutes(5), SECRET).expect("issue");
        assert_eq!(
            decode_token(&token, b"some-other-secret"),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert_eq!(decode_token("not.a.jwt", SECRET), Err(TokenError::Malformed));
        assert_eq!(decode_token("", SECRET), Err(TokenError::Malformed));
    }

    #[test]
    fn token_without_subject_is_malformed() {
        #[derive(Serialize)]
        struct NoSub {
            exp: i64,
            iat: i64,
        }
        let now = Utc::now().timestamp();
        let claims = NoSub {
            exp: now + 300,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode");
        assert_eq!(decode_token(&token, SECRET), Err(TokenError::Malformed));
    }
}
