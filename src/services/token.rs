//! Signed, expiring tokens for sessions and password resets.
//!
//! Both token kinds share the signing secret; they are told apart by their
//! claim shape (`role` vs `purpose`). The scheme itself does not enforce the
//! distinction, so verification here checks the discriminator explicitly and
//! callers must use the matching verify function.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SESSION_ROLE: &str = "admin";
pub const RESET_PURPOSE: &str = "reset";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    Invalid,

    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Token generation failed: {0}")]
    Generation(String),
}

/// Claims carried by the session cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Claims carried in the password-reset link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetClaims {
    pub username: String,
    pub purpose: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn sign_session(username: &str, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = SessionClaims {
        username: username.to_string(),
        role: SESSION_ROLE.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };
    sign(&claims, secret)
}

pub fn sign_reset(username: &str, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = ResetClaims {
        username: username.to_string(),
        purpose: RESET_PURPOSE.to_string(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };
    sign(&claims, secret)
}

pub fn verify_session(token: &str, secret: &str) -> Result<SessionClaims, TokenError> {
    let claims: SessionClaims = verify(token, secret)?;

    if claims.role != SESSION_ROLE {
        return Err(TokenError::Invalid);
    }

    Ok(claims)
}

pub fn verify_reset(token: &str, secret: &str) -> Result<ResetClaims, TokenError> {
    let claims: ResetClaims = verify(token, secret)?;

    if claims.purpose != RESET_PURPOSE {
        return Err(TokenError::Invalid);
    }

    Ok(claims)
}

fn sign<T: Serialize>(claims: &T, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &key).map_err(|e| TokenError::Generation(e.to_string()))
}

fn verify<T: serde::de::DeserializeOwned>(token: &str, secret: &str) -> Result<T, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<T>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_session_token_round_trip() {
        let token = sign_session("admin", SECRET, Duration::hours(24)).unwrap();
        let claims = verify_session(&token, SECRET).unwrap();

        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, SESSION_ROLE);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_reset_token_round_trip() {
        let token = sign_reset("admin", SECRET, Duration::hours(1)).unwrap();
        let claims = verify_reset(&token, SECRET).unwrap();

        assert_eq!(claims.username, "admin");
        assert_eq!(claims.purpose, RESET_PURPOSE);
    }

    #[test]
    fn test_expired_session_token_rejected() {
        // Past the default 60s validation leeway.
        let token = sign_session("admin", SECRET, Duration::seconds(-120)).unwrap();
        assert!(matches!(verify_session(&token, SECRET), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_reset_token_rejected_as_session() {
        let token = sign_reset("admin", SECRET, Duration::hours(1)).unwrap();
        assert!(verify_session(&token, SECRET).is_err());
    }

    #[test]
    fn test_session_token_rejected_as_reset() {
        let token = sign_session("admin", SECRET, Duration::hours(24)).unwrap();
        assert!(verify_reset(&token, SECRET).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session("admin", SECRET, Duration::hours(24)).unwrap();
        assert!(verify_session(&token, "other-secret").is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(verify_session("not.a.token", SECRET).is_err());
        assert!(verify_session("", SECRET).is_err());
    }

    #[test]
    fn test_empty_secret_refused() {
        assert!(matches!(
            sign_session("admin", "", Duration::hours(1)),
            Err(TokenError::MissingSecret)
        ));
    }
}
