use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::OutgoingEmail;

#[derive(Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    /// Hidden form field. Humans leave it empty; bots fill it in.
    #[serde(default, rename = "_honeypot")]
    pub honeypot: String,
}

/// POST /api/contact
/// Forwards a contact form submission to the configured recipient.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let sent_response = || {
        Json(ApiResponse::success(MessageResponse {
            message: "Message sent".to_string(),
        }))
    };

    // Bots that fill the honeypot get a normal-looking success and no email.
    if !payload.honeypot.is_empty() {
        tracing::debug!("Contact submission dropped by honeypot");
        return Ok(sent_response());
    }

    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    if payload.email.trim().is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    let settings = state.settings.get().await?;

    let name = payload.name.trim();
    let email = payload.email.trim();
    let message = payload.message.trim();

    state
        .mailer
        .send(OutgoingEmail {
            to: settings.contact_email,
            subject: format!("Contact form message from {name} ({email})"),
            text: format!("From: {name} <{email}>\n\n{message}"),
            html: format!(
                "<p><strong>From:</strong> {} &lt;{}&gt;</p><p>{}</p>",
                html_escape::encode_text(name),
                html_escape::encode_text(email),
                html_escape::encode_text(message).replace('\n', "<br>")
            ),
        })
        .await?;

    Ok(sent_response())
}
