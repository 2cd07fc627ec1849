use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::ContactSettings;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactSettingsRequest {
    pub contact_email: String,
}

/// GET /api/settings/contact
pub async fn get_contact_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ContactSettings>>, ApiError> {
    let settings = state.settings.get().await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// POST /api/settings/contact
pub async fn update_contact_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateContactSettingsRequest>,
) -> Result<Json<ApiResponse<ContactSettings>>, ApiError> {
    let settings = state.settings.update(payload.contact_email.trim()).await?;
    Ok(Json(ApiResponse::success(settings)))
}
