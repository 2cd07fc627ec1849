//! JSON-file implementation of the [`SettingsService`] trait.

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::services::settings_service::{ContactSettings, SettingsError, SettingsService};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub struct JsonSettingsService {
    path: PathBuf,
    default_email: String,
}

impl JsonSettingsService {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, default_email: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_email: default_email.into(),
        }
    }

    async fn write(&self, settings: &ContactSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsService for JsonSettingsService {
    async fn get(&self) -> Result<ContactSettings, SettingsError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| SettingsError::Storage(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = ContactSettings {
                    contact_email: self.default_email.clone(),
                    updated_at: Utc::now().to_rfc3339(),
                };
                self.write(&settings).await?;
                Ok(settings)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, contact_email: &str) -> Result<ContactSettings, SettingsError> {
        if !EMAIL_RE.is_match(contact_email) {
            return Err(SettingsError::InvalidEmail);
        }

        let settings = ContactSettings {
            contact_email: contact_email.to_string(),
            updated_at: Utc::now().to_rfc3339(),
        };
        self.write(&settings).await?;

        tracing::info!(contact_email, "Contact settings updated");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_initializes_with_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings/contact.json");
        let service = JsonSettingsService::new(&path, "owner@example.com");

        let settings = service.get().await.unwrap();
        assert_eq!(settings.contact_email, "owner@example.com");
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_update_persists_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contact.json");
        let service = JsonSettingsService::new(&path, "owner@example.com");

        let updated = service.update("new@example.com").await.unwrap();
        assert_eq!(updated.contact_email, "new@example.com");

        let read_back = service.get().await.unwrap();
        assert_eq!(read_back.contact_email, "new@example.com");
        assert_eq!(read_back.updated_at, updated.updated_at);

        // On-disk field names match the established format.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("contactEmail"));
        assert!(raw.contains("updatedAt"));
    }

    #[tokio::test]
    async fn test_update_rejects_bad_email() {
        let dir = tempfile::tempdir().unwrap();
        let service = JsonSettingsService::new(dir.path().join("contact.json"), "a@b.co");

        for bad in ["", "not-an-email", "a@b", "a b@c.com", "@missing.local"] {
            assert!(
                matches!(service.update(bad).await, Err(SettingsError::InvalidEmail)),
                "accepted {bad:?}"
            );
        }
    }
}
