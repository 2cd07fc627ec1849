//! Domain service for blog posts.
//!
//! Posts live as one front-matter Markdown file per slug. Creation is the
//! only mutation; there is no update or delete.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("A post with this slug already exists")]
    SlugExists(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for PostError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Payload for a new post, as submitted by the admin editor.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tags: Vec<String>,
    pub published_at: String,
}

/// Listing entry: front matter without the body.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub published_at: String,
}

/// A full post including its Markdown body.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub title: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub published_at: String,
    pub content: String,
}

/// Domain service trait for post storage.
#[async_trait::async_trait]
pub trait PostService: Send + Sync {
    /// Persists a new post.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::SlugExists`] when a post with the slug is already
    /// on disk; the existing file is left untouched.
    async fn create(&self, post: NewPost) -> Result<(), PostError>;

    /// Lists all posts, newest first.
    async fn list(&self) -> Result<Vec<PostSummary>, PostError>;

    /// Reads a single post by slug.
    async fn get(&self, slug: &str) -> Result<Post, PostError>;
}
