use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LoginResponse, MessageResponse, PasswordRotationResponse};
use crate::services::OutgoingEmail;

pub const SESSION_COOKIE: &str = "auth_token";

const RESET_CONFIRMATION: &str = "If the account exists, a password reset email has been sent";

// ============================================================================
// Request Types
// ============================================================================

/// Single-endpoint auth request. `action` selects the operation; the other
/// fields are read per action.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub action: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub new_password: String,
}

// ============================================================================
// Cookie helpers
// ============================================================================

fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={max_age_seconds}; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Pulls the session token out of the Cookie header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

// ============================================================================
// Middleware
// ============================================================================

/// Guard for API routes. Rejects with a JSON 401 when the session cookie is
/// missing or does not verify.
pub async fn session_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let user = state
        .auth
        .verify_session(&token)
        .map_err(|_| ApiError::unauthorized("Authentication required"))?;

    tracing::Span::current().record("user_id", &user.username);
    Ok(next.run(request).await)
}

/// Guard for admin pages. Browsers get a redirect to the login page instead
/// of a JSON error. The login and reset pages themselves stay reachable, and
/// paths outside /admin pass through untouched.
pub async fn admin_page_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    let exempt = !path.starts_with("/admin")
        || path == "/admin/login"
        || path.starts_with("/admin/forgot-password")
        || path.starts_with("/admin/reset-password");

    if exempt {
        return next.run(request).await;
    }

    let authenticated = session_token(request.headers())
        .is_some_and(|token| state.auth.verify_session(&token).is_ok());

    if authenticated {
        next.run(request).await
    } else {
        Redirect::to("/admin/login").into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth
/// Dispatches on `action`: login, reset-request, reset-password,
/// change-password, logout.
pub async fn auth_action(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthRequest>,
) -> Result<Response, ApiError> {
    match payload.action.as_str() {
        "login" => login(&state, &payload).await,
        "reset-request" => reset_request(&state, &payload).await,
        "reset-password" => reset_password(&state, &payload).await,
        "change-password" => change_password(&state, &payload).await,
        "logout" => Ok(logout(&state)),
        _ => Err(ApiError::validation("Invalid action")),
    }
}

async fn login(state: &AppState, payload: &AuthRequest) -> Result<Response, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state.auth.login(&payload.username, &payload.password).await?;

    let max_age = state.config.auth.session_ttl_hours * 3600;
    let cookie = session_cookie(&result.token, max_age, state.config.server.secure_cookies);

    let body = Json(ApiResponse::success(LoginResponse { user: result.user }));
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

async fn reset_request(state: &AppState, payload: &AuthRequest) -> Result<Response, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }

    // Unknown usernames get the same confirmation with no email, so the
    // response does not reveal whether the account exists.
    if let Some(reset) = state.auth.request_reset(&payload.username).await? {
        let email = reset_email(&state.config.smtp.owner_email, &reset.reset_url);
        state.mailer.send(email).await?;
    }

    Ok(Json(ApiResponse::success(MessageResponse {
        message: RESET_CONFIRMATION.to_string(),
    }))
    .into_response())
}

async fn reset_password(state: &AppState, payload: &AuthRequest) -> Result<Response, ApiError> {
    if payload.token.is_empty() {
        return Err(ApiError::validation("Token is required"));
    }
    validate_new_password(&payload.new_password)?;

    state
        .auth
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Password reset processed; the new hash has been logged for rotation"
            .to_string(),
    }))
    .into_response())
}

async fn change_password(state: &AppState, payload: &AuthRequest) -> Result<Response, ApiError> {
    // Same credential check as login; no session involved.
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Current password is required"));
    }
    validate_new_password(&payload.new_password)?;

    let new_hash = state
        .auth
        .change_password(&payload.username, &payload.password, &payload.new_password)
        .await?;

    // The hash goes back to the caller for manual rotation into the
    // deployment environment.
    Ok(Json(ApiResponse::success(PasswordRotationResponse {
        message: "Password change processed; update ADMIN_PASSWORD_HASH to apply it".to_string(),
        password_hash: new_hash,
    }))
    .into_response())
}

fn logout(state: &AppState) -> Response {
    let cookie = clear_session_cookie(state.config.server.secure_cookies);
    let body = Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    }));
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        body,
    )
        .into_response()
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_new_password(new_password: &str) -> Result<(), ApiError> {
    if new_password.len() < 8 {
        return Err(ApiError::validation(
            "New password must be at least 8 characters",
        ));
    }
    Ok(())
}

fn reset_email(to: &str, reset_url: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Password reset request".to_string(),
        text: format!(
            "A password reset was requested for the admin account.\n\n\
             Open this link to choose a new password (valid for one hour):\n{reset_url}\n\n\
             If you did not request this, you can ignore this email."
        ),
        html: format!(
            "<p>A password reset was requested for the admin account.</p>\
             <p><a href=\"{reset_url}\">Reset your password</a> (valid for one hour)</p>\
             <p>If you did not request this, you can ignore this email.</p>"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc", 86400, true);
        assert_eq!(
            cookie,
            "auth_token=abc; HttpOnly; Path=/; Max-Age=86400; SameSite=Lax; Secure"
        );

        let insecure = session_cookie("abc", 86400, false);
        assert!(!insecure.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.contains("auth_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_token_parses_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; auth_token=tok123; other=1".parse().unwrap(),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("tok123"));

        let mut empty = HeaderMap::new();
        empty.insert(header::COOKIE, "auth_token=".parse().unwrap());
        assert_eq!(session_token(&empty), None);

        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
