//! Outbound email transports.
//!
//! The rest of the application only sees the [`Mailer`] trait. Which
//! implementation backs it is picked from `mailer.transport` at startup.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{MailTransport, MailerConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to render email: {0}")]
    Render(#[from] askama::Error),

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Mailer is not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Builds the transport selected in the configuration.
pub fn from_config(config: &MailerConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.transport {
        MailTransport::Log => Ok(Arc::new(LogMailer)),
        MailTransport::Http => Ok(Arc::new(HttpMailer::new(config)?)),
    }
}

/// Writes every message to the log and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        info!(
            event = "email_logged",
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            "Email not sent (log transport)"
        );
        debug!(html = %email.html, "Email body");
        Ok(())
    }
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: Address<'a>,
    to: [Address<'a>; 1],
    subject: &'a str,
    html: &'a str,
}

impl<'a> From<&'a Email> for SendRequest<'a> {
    fn from(email: &'a Email) -> Self {
        Self {
            from: Address { email: &email.from },
            to: [Address { email: &email.to }],
            subject: &email.subject,
            html: &email.html,
        }
    }
}

/// Sends messages through a transactional mail HTTP API.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl HttpMailer {
    pub fn new(config: &MailerConfig) -> Result<Self, MailError> {
        let api_url = config
            .api_url
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| MailError::NotConfigured("mailer.api_url is missing".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.into()))
            .user_agent(concat!("wildseries/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let mut request = self
            .client
            .post(&self.api_url)
            .json(&SendRequest::from(&email));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(MailError::Transport(format!("{status}: {text}")));
        }

        info!(event = "email_sent", to = %email.to, subject = %email.subject, "Email sent");
        Ok(())
    }
}

/// Keeps sent messages in memory. Used by the test suite.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<Email>>>,
    fail: bool,
}

impl MemoryMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    #[must_use]
    pub fn sent(&self) -> Vec<Email> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            from: "a@example.com".to_string(),
            to: "b@example.com".to_string(),
            subject: "Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[test]
    fn test_http_payload_shape() {
        let email = email();
        let payload = serde_json::to_value(SendRequest::from(&email)).unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "from": { "email": "a@example.com" },
                "to": [{ "email": "b@example.com" }],
                "subject": "Hello",
                "html": "<p>Hi</p>",
            })
        );
    }

    #[tokio::test]
    async fn test_memory_mailer_records_messages() {
        let mailer = MemoryMailer::new();
        let handle = mailer.clone();
        mailer.send(email()).await.unwrap();

        let sent = handle.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Hello");
    }

    #[tokio::test]
    async fn test_failing_mailer() {
        let mailer = MemoryMailer::failing();
        assert!(matches!(
            mailer.send(email()).await,
            Err(MailError::Transport(_))
        ));
        assert!(mailer.sent().is_empty());
    }

    #[test]
    fn test_http_mailer_requires_url() {
        let config = MailerConfig {
            transport: MailTransport::Http,
            ..MailerConfig::default()
        };
        assert!(matches!(
            HttpMailer::new(&config),
            Err(MailError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_log_transport_is_default() {
        assert!(from_config(&MailerConfig::default()).is_ok());
    }
}
