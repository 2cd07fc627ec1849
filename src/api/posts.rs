use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CreatePostResponse};
use crate::services::{NewPost, Post, PostSummary};

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// POST /api/posts
/// Creates a new post file. Duplicate slugs are rejected without touching
/// the existing file.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<CreatePostResponse>>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }
    if payload.content.trim().is_empty() {
        return Err(ApiError::validation("Content is required"));
    }

    let published_at = payload
        .date
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let slug = payload.slug.clone();
    state
        .posts
        .create(NewPost {
            title: payload.title,
            slug: payload.slug,
            content: payload.content,
            tags: payload.tags,
            published_at,
        })
        .await?;

    Ok(Json(ApiResponse::success(CreatePostResponse { slug })))
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PostSummary>>>, ApiError> {
    let posts = state.posts.list().await?;
    Ok(Json(ApiResponse::success(posts)))
}

/// GET /api/posts/{slug}
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.posts.get(&slug).await?;
    Ok(Json(ApiResponse::success(post)))
}
