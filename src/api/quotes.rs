use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiResponse, AppState};
use crate::services::Quote;

/// GET /api/quotes/random
pub async fn random_quote(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Quote>> {
    Json(ApiResponse::success(state.quotes.random()))
}

/// GET /api/quotes/tag/{tag}
/// Unknown tags fall back to the full collection.
pub async fn quote_by_tag(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> Json<ApiResponse<Quote>> {
    Json(ApiResponse::success(state.quotes.by_tag(&tag)))
}
