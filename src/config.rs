use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub mailer: MailerConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/wildseries.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Whether to set the Secure flag on session cookies.
    /// Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Sessions expire after this many minutes without a request.
    pub session_inactivity_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            secure_cookies: true,
            session_inactivity_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Write emails to the log instead of sending them.
    Log,
    /// POST emails to a transactional mail HTTP API.
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    pub transport: MailTransport,

    /// Sender address of every notification.
    pub from: String,

    /// Inbox that receives new-program and new-episode notifications.
    pub notification_recipient: String,

    /// Send endpoint of the mail API, required by the `http` transport.
    pub api_url: Option<String>,

    #[serde(skip_serializing)]
    pub api_token: Option<String>,

    pub request_timeout_seconds: u16,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::Log,
            from: "no-reply@wildseries.test".to_string(),
            notification_recipient: "notifications@wildseries.test".to_string(),
            api_url: None,
            api_token: None,
            request_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "wildseries".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Config {
    /// Loads the first config file found (see `config_paths`), then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// `DATABASE_URL` and `MAILER_API_TOKEN` win over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL")
            && !url.is_empty()
        {
            self.general.database_path = url;
        }
        if let Ok(token) = std::env::var("MAILER_API_TOKEN")
            && !token.is_empty()
        {
            self.mailer.api_token = Some(token);
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("wildseries").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".wildseries").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.mailer.from.trim().is_empty() {
            anyhow::bail!("mailer.from cannot be empty");
        }

        if self.mailer.notification_recipient.trim().is_empty() {
            anyhow::bail!("mailer.notification_recipient cannot be empty");
        }

        if self.mailer.transport == MailTransport::Http
            && self.mailer.api_url.as_deref().is_none_or(str::is_empty)
        {
            anyhow::bail!("mailer.api_url is required when mailer.transport = \"http\"");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("general.min_db_connections cannot exceed general.max_db_connections");
        }

        if self.server.session_inactivity_minutes <= 0 {
            anyhow::bail!("server.session_inactivity_minutes must be > 0");
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
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.mailer.transport, MailTransport::Log);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[mailer]"));
        assert!(toml_str.contains("transport = \"log\""));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [mailer]
            transport = "http"
            api_url = "https://send.api.mailtrap.io/api/send"
            notification_recipient = "inbox@example.com"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.mailer.transport, MailTransport::Http);
        assert_eq!(config.mailer.notification_recipient, "inbox@example.com");
        assert_eq!(config.mailer.from, "no-reply@wildseries.test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir()
            .join(format!("wildseries-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[general]\nmax_db_connections = 8\nmin_db_connections = 2\n\n[server]\nport = 9000\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.general.max_db_connections, 8);
        assert_eq!(config.general.min_db_connections, 2);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        assert!(Config::load_from_path(Path::new("/nonexistent/wildseries.toml")).is_err());
    }

    #[test]
    fn test_http_transport_requires_url() {
        let mut config = Config::default();
        config.mailer.transport = MailTransport::Http;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_bounds_are_checked() {
        let mut config = Config::default();
        config.general.min_db_connections = 10;
        assert!(config.validate().is_err());
    }
}
