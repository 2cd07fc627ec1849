//! Config-backed implementation of the [`AuthService`] trait.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth_service::{
    AuthError, AuthService, LoginResult, ResetRequest, SessionUser,
};
use crate::services::password::hash_password;
use crate::services::token;

/// Authenticates against the single admin credential from the config.
/// Holds no mutable state; rotation flows only log and return new hashes.
pub struct StaticAdminAuthService {
    config: Arc<Config>,
}

impl StaticAdminAuthService {
    #[must_use]
    pub const fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn check_credentials(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let auth = &self.config.auth;

        // Evaluate both checks before failing so wrong-user and
        // wrong-password requests are indistinguishable.
        let username_ok = username == auth.admin_username;
        let hash_ok = hash_password(password, &auth.admin_password_salt) == auth.admin_password_hash;

        if username_ok && hash_ok {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[async_trait]
impl AuthService for StaticAdminAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        self.check_credentials(username, password)?;

        let auth = &self.config.auth;
        let ttl = Duration::hours(auth.session_ttl_hours);
        let signed = token::sign_session(username, &auth.jwt_secret, ttl)?;

        tracing::info!(username, "Admin login successful");

        Ok(LoginResult {
            token: signed,
            user: SessionUser {
                username: username.to_string(),
                role: token::SESSION_ROLE.to_string(),
            },
        })
    }

    async fn request_reset(&self, username: &str) -> Result<Option<ResetRequest>, AuthError> {
        let auth = &self.config.auth;

        if username != auth.admin_username {
            tracing::debug!("Reset requested for unknown username, suppressing");
            return Ok(None);
        }

        let ttl = Duration::minutes(auth.reset_ttl_minutes);
        let signed = token::sign_reset(username, &auth.jwt_secret, ttl)?;

        let reset_url = format!(
            "{}/admin/reset-password/{}",
            self.config.server.public_url.trim_end_matches('/'),
            signed
        );

        Ok(Some(ResetRequest {
            token: signed,
            reset_url,
        }))
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, AuthError> {
        let auth = &self.config.auth;

        let claims = token::verify_reset(token, &auth.jwt_secret)?;

        if claims.username != auth.admin_username {
            return Err(AuthError::InvalidToken);
        }

        let new_hash = hash_password(new_password, &auth.admin_password_salt);

        // No credential store: the operator copies the hash into the
        // deployment environment by hand.
        tracing::info!(
            new_hash,
            "New password hash generated; update ADMIN_PASSWORD_HASH to apply it"
        );

        Ok(new_hash)
    }

    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, AuthError> {
        self.check_credentials(username, current_password)?;

        let auth = &self.config.auth;
        let new_hash = hash_password(new_password, &auth.admin_password_salt);

        tracing::info!(
            new_hash,
            "New password hash generated; update ADMIN_PASSWORD_HASH to apply it"
        );

        Ok(new_hash)
    }

    fn verify_session(&self, token: &str) -> Result<SessionUser, AuthError> {
        let claims = token::verify_session(token, &self.config.auth.jwt_secret)?;

        Ok(SessionUser {
            username: claims.username,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Arc<Config> {
        let mut config = Config::default();
        config.auth.admin_username = "admin".to_string();
        config.auth.admin_password_salt = "0123456789abcdef".to_string();
        config.auth.admin_password_hash =
            hash_password("hunter22", "0123456789abcdef");
        config.auth.jwt_secret = "unit-test-secret".to_string();
        Arc::new(config)
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_session() {
        let service = StaticAdminAuthService::new(test_config());

        let result = service.login("admin", "hunter22").await.unwrap();
        assert_eq!(result.user.username, "admin");
        assert_eq!(result.user.role, "admin");

        let user = service.verify_session(&result.token).unwrap();
        assert_eq!(user.username, "admin");
    }

    #[tokio::test]
    async fn test_wrong_user_and_wrong_password_fail_identically() {
        let service = StaticAdminAuthService::new(test_config());

        let wrong_user = service.login("nobody", "hunter22").await.unwrap_err();
        let wrong_password = service.login("admin", "wrong").await.unwrap_err();

        assert_eq!(wrong_user.to_string(), wrong_password.to_string());
        assert!(matches!(wrong_user, AuthError::InvalidCredentials));
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_reset_request_suppressed_for_unknown_user() {
        let service = StaticAdminAuthService::new(test_config());

        assert!(service.request_reset("nobody").await.unwrap().is_none());

        let request = service.request_reset("admin").await.unwrap().unwrap();
        assert!(request.reset_url.contains("/admin/reset-password/"));
        assert!(request.reset_url.ends_with(&request.token));
    }

    #[tokio::test]
    async fn test_reset_password_with_reset_token() {
        let service = StaticAdminAuthService::new(test_config());

        let request = service.request_reset("admin").await.unwrap().unwrap();
        let new_hash = service.reset_password(&request.token, "new-password").await.unwrap();

        assert_eq!(new_hash, hash_password("new-password", "0123456789abcdef"));
    }

    #[tokio::test]
    async fn test_reset_password_rejects_session_token() {
        let service = StaticAdminAuthService::new(test_config());

        let login = service.login("admin", "hunter22").await.unwrap();
        let err = service.reset_password(&login.token, "new-password").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_change_password_requires_current_password() {
        let service = StaticAdminAuthService::new(test_config());

        let err = service
            .change_password("admin", "wrong", "new-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let new_hash = service
            .change_password("admin", "hunter22", "new-password")
            .await
            .unwrap();
        assert_eq!(new_hash, hash_password("new-password", "0123456789abcdef"));
    }

    #[tokio::test]
    async fn test_verify_session_rejects_reset_token() {
        let service = StaticAdminAuthService::new(test_config());

        let request = service.request_reset("admin").await.unwrap().unwrap();
        assert!(service.verify_session(&request.token).is_err());
    }
}
