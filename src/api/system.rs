use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, SystemStatusResponse};

/// GET /api/system/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SystemStatusResponse>> {
    Json(ApiResponse::success(SystemStatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
