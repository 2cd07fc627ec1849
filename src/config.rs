use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub smtp: SmtpConfig,

    pub content: ContentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on the session cookie.
    /// Default: true for production safety. Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Public base URL used when building the password-reset link.
    pub public_url: String,

    /// Directory of static files served at the site root. The `admin/`
    /// subtree of it sits behind the session guard.
    pub web_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            secure_cookies: true,
            public_url: "http://localhost:3000".to_string(),
            web_root: "web".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_username: String,

    /// PBKDF2-HMAC-SHA256 hex digest of the admin password.
    /// Generate with `quill setup-admin`.
    pub admin_password_hash: String,

    pub admin_password_salt: String,

    /// HS256 signing secret for session and reset tokens.
    pub jwt_secret: String,

    pub session_ttl_hours: i64,

    pub reset_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password_hash: String::new(),
            admin_password_salt: String::new(),
            jwt_secret: String::new(),
            session_ttl_hours: 24,
            reset_ttl_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,

    pub port: u16,

    /// Implicit TLS when true, STARTTLS otherwise.
    pub secure: bool,

    pub username: String,

    pub password: String,

    pub from: String,

    /// Address that receives reset links and is the default contact
    /// recipient before settings are saved.
    pub owner_email: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            secure: false,
            username: String::new(),
            password: String::new(),
            from: "noreply@example.com".to_string(),
            owner_email: "owner@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding one front-matter Markdown file per post.
    pub posts_dir: String,

    /// Singleton JSON file with the contact settings.
    pub settings_file: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: "content".to_string(),
            settings_file: "content/settings/contact.json".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            smtp: SmtpConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path).map(Self::with_env_overrides);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default().with_env_overrides())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Secrets and deployment-specific values come from the environment when
    /// set, so the config file never has to contain credentials.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        use std::env;

        if let Ok(v) = env::var("ADMIN_USERNAME") {
            self.auth.admin_username = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_HASH") {
            self.auth.admin_password_hash = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_SALT") {
            self.auth.admin_password_salt = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            self.smtp.owner_email = v;
        }

        if let Ok(v) = env::var("SMTP_HOST") {
            self.smtp.host = v;
        }
        if let Ok(v) = env::var("SMTP_PORT") {
            self.smtp.port = v.parse().unwrap_or(self.smtp.port);
        }
        if let Ok(v) = env::var("SMTP_SECURE") {
            self.smtp.secure = v.parse().unwrap_or(self.smtp.secure);
        }
        if let Ok(v) = env::var("SMTP_USER") {
            self.smtp.username = v;
        }
        if let Ok(v) = env::var("SMTP_PASSWORD") {
            self.smtp.password = v;
        }
        if let Ok(v) = env::var("SMTP_FROM") {
            self.smtp.from = v;
        }

        if let Ok(v) = env::var("PUBLIC_APP_URL") {
            self.server.public_url = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        self
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("quill").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".quill").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.admin_username.is_empty() {
            anyhow::bail!("Admin username cannot be empty");
        }

        if self.auth.session_ttl_hours <= 0 || self.auth.reset_ttl_minutes <= 0 {
            anyhow::bail!("Token lifetimes must be positive");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.admin_username, "admin");
        assert_eq!(config.auth.session_ttl_hours, 24);
        assert_eq!(config.auth.reset_ttl_minutes, 60);
        assert!(config.server.secure_cookies);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[auth]"));
        assert!(toml_str.contains("[smtp]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [auth]
            admin_username = "pascal"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.auth.admin_username, "pascal");

        assert_eq!(config.smtp.port, 587);
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = Config::default();
        config.auth.session_ttl_hours = 0;
        assert!(config.validate().is_err());
    }
}
