//! Domain service for admin authentication.
//!
//! There is exactly one credential per deployment and no credential store:
//! login and change-password compare against the configured hash, and both
//! rotation flows hand the freshly derived hash back for the operator to
//! persist manually.

use serde::Serialize;
use thiserror::Error;

use super::token::TokenError;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::InvalidToken,
            TokenError::MissingSecret | TokenError::Generation(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

/// Authenticated admin identity, as echoed back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub username: String,
    pub role: String,
}

/// Successful login: the session token plus the user it represents.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub user: SessionUser,
}

/// Reset link material for the admin account. `None` means the username did
/// not match and the request must be silently swallowed (anti-enumeration).
#[derive(Debug, Clone)]
pub struct ResetRequest {
    pub token: String,
    pub reset_url: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown username and
    /// for a wrong password alike; callers must not be able to tell the two
    /// apart.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Starts the password-reset flow for a username.
    ///
    /// Returns `Ok(None)` when the username does not match the configured
    /// admin; the caller responds with the same success payload either way.
    async fn request_reset(&self, username: &str) -> Result<Option<ResetRequest>, AuthError>;

    /// Completes a reset: verifies the reset token and derives the new hash.
    ///
    /// The hash is returned (and logged) for manual rotation; nothing is
    /// persisted.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, AuthError>;

    /// Rotates the password for a caller that still knows the current one.
    /// Same credential check as [`AuthService::login`]; returns the new hash.
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, AuthError>;

    /// Verifies a session token, as presented in the auth cookie.
    fn verify_session(&self, token: &str) -> Result<SessionUser, AuthError>;
}
