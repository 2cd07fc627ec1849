//! Domain service for the contact settings singleton.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// The one settings record, stored as a small JSON file.
/// Field names match the on-disk format written by the admin UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSettings {
    pub contact_email: String,
    pub updated_at: String,
}

/// Domain service trait for contact settings.
#[async_trait::async_trait]
pub trait SettingsService: Send + Sync {
    /// Reads the settings, creating the file with the configured default
    /// address on first access.
    async fn get(&self) -> Result<ContactSettings, SettingsError>;

    /// Replaces the contact address and stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEmail`] when the address does not look
    /// like an email.
    async fn update(&self, contact_email: &str) -> Result<ContactSettings, SettingsError>;
}
