//! Filesystem implementation of the [`PostService`] trait.
//!
//! One `.mdx` file per post under the content directory:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2026-08-29
//! tags: [rust, blog]
//! ---
//!
//! Body in Markdown.
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::services::post_service::{NewPost, Post, PostError, PostService, PostSummary};

const POST_EXTENSION: &str = "mdx";

pub struct MdxPostService {
    posts_dir: PathBuf,
}

impl MdxPostService {
    #[must_use]
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(format!("{slug}.{POST_EXTENSION}"))
    }
}

#[async_trait]
impl PostService for MdxPostService {
    async fn create(&self, post: NewPost) -> Result<(), PostError> {
        validate_slug(&post.slug)?;

        tokio::fs::create_dir_all(&self.posts_dir).await?;

        let path = self.post_path(&post.slug);
        let body = render_post(&post);

        // create_new makes the existence check and the write one operation,
        // so two concurrent creates cannot both win the slug.
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(PostError::SlugExists(post.slug));
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(body.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(slug = %post.slug, "Post created");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PostSummary>, PostError> {
        let mut summaries = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.posts_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(summaries),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = tokio::fs::read_to_string(&path).await?;
            match parse_post(slug, &raw) {
                Ok(post) => summaries.push(PostSummary {
                    title: post.title,
                    slug: post.slug,
                    tags: post.tags,
                    published_at: post.published_at,
                }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Skipping unparseable post: {e}");
                }
            }
        }

        summaries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(summaries)
    }

    async fn get(&self, slug: &str) -> Result<Post, PostError> {
        validate_slug(slug)?;

        let path = self.post_path(slug);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PostError::NotFound(slug.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        parse_post(slug, &raw)
    }
}

/// Slugs double as filenames, so they are restricted to a safe alphabet.
fn validate_slug(slug: &str) -> Result<(), PostError> {
    if slug.is_empty() {
        return Err(PostError::InvalidSlug("slug cannot be empty".to_string()));
    }

    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid || slug.starts_with('-') || slug.ends_with('-') {
        return Err(PostError::InvalidSlug(format!(
            "'{slug}' may only contain lowercase letters, digits and inner hyphens"
        )));
    }

    Ok(())
}

fn render_post(post: &NewPost) -> String {
    format!(
        "---\ntitle: {}\ndate: {}\ntags: [{}]\n---\n\n{}\n",
        post.title,
        post.published_at,
        post.tags.join(", "),
        post.content
    )
}

fn parse_post(slug: &str, raw: &str) -> Result<Post, PostError> {
    let rest = raw
        .strip_prefix("---\n")
        .ok_or_else(|| PostError::Storage(format!("'{slug}': missing front matter")))?;

    let (front, body) = rest
        .split_once("\n---\n")
        .ok_or_else(|| PostError::Storage(format!("'{slug}': unterminated front matter")))?;

    let mut title = String::new();
    let mut published_at = String::new();
    let mut tags = Vec::new();

    for line in front.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            match key.trim() {
                "title" => title = value.to_string(),
                "date" => published_at = value.to_string(),
                "tags" => {
                    let inner = value.trim_start_matches('[').trim_end_matches(']');
                    tags = inner
                        .split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect();
                }
                _ => {}
            }
        }
    }

    Ok(Post {
        title,
        slug: slug.to_string(),
        tags,
        published_at,
        content: body.trim_start_matches('\n').trim_end().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(slug: &str) -> NewPost {
        NewPost {
            title: "Hello World".to_string(),
            slug: slug.to_string(),
            content: "First post.\n\nWith two paragraphs.".to_string(),
            tags: vec!["rust".to_string(), "blog".to_string()],
            published_at: "2026-08-29".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_writes_front_matter_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = MdxPostService::new(dir.path());

        service.create(sample_post("hello-world")).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("hello-world.mdx")).unwrap();
        assert!(raw.starts_with("---\ntitle: Hello World\n"));
        assert!(raw.contains("tags: [rust, blog]"));
        assert!(raw.contains("First post."));
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts_and_preserves_original() {
        let dir = tempfile::tempdir().unwrap();
        let service = MdxPostService::new(dir.path());

        service.create(sample_post("hello-world")).await.unwrap();
        let original = std::fs::read_to_string(dir.path().join("hello-world.mdx")).unwrap();

        let mut second = sample_post("hello-world");
        second.title = "Different Title".to_string();
        let err = service.create(second).await.unwrap_err();

        assert!(matches!(err, PostError::SlugExists(_)));
        let after = std::fs::read_to_string(dir.path().join("hello-world.mdx")).unwrap();
        assert_eq!(original, after);
    }

    #[tokio::test]
    async fn test_get_round_trips_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let service = MdxPostService::new(dir.path());

        service.create(sample_post("hello-world")).await.unwrap();
        let post = service.get("hello-world").await.unwrap();

        assert_eq!(post.title, "Hello World");
        assert_eq!(post.published_at, "2026-08-29");
        assert_eq!(post.tags, vec!["rust", "blog"]);
        assert_eq!(post.content, "First post.\n\nWith two paragraphs.");
    }

    #[tokio::test]
    async fn test_get_missing_post_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let service = MdxPostService::new(dir.path());

        assert!(matches!(
            service.get("nope").await.unwrap_err(),
            PostError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let service = MdxPostService::new(dir.path());

        let mut older = sample_post("older");
        older.published_at = "2026-01-01".to_string();
        let mut newer = sample_post("newer");
        newer.published_at = "2026-08-01".to_string();

        service.create(older).await.unwrap();
        service.create(newer).await.unwrap();

        let posts = service.list().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "newer");
        assert_eq!(posts[1].slug, "older");
    }

    #[tokio::test]
    async fn test_list_empty_when_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        let service = MdxPostService::new(dir.path().join("does-not-exist"));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("hello-world").is_ok());
        assert!(validate_slug("post2").is_ok());

        assert!(validate_slug("").is_err());
        assert!(validate_slug("Hello").is_err());
        assert!(validate_slug("../etc/passwd").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
    }
}
