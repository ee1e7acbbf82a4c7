//! `Mailer` implementations selected by `mail.provider`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use foodbridge_core::config::{MailConfig, MailProvider};
use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::traits::{Mailer, OutgoingMail};

/// Build the mailer configured in `config`.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    match config.provider {
        MailProvider::Log => Ok(Arc::new(LogMailer::new(&config.from))),
        MailProvider::Webhook => {
            let url = config.webhook_url.as_deref().ok_or_else(|| {
                AppError::configuration("mail.webhook_url is required for the webhook provider")
            })?;
            Ok(Arc::new(WebhookMailer::new(
                url,
                &config.from,
                Duration::from_secs(config.timeout_seconds),
            )?))
        }
    }
}

/// Records outbound mail in the log instead of delivering it.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    /// Create a log mailer with the given sender address.
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %mail.to,
            subject = %mail.subject,
            body_len = mail.body.len(),
            "Outbound mail (log transport)"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Posts outbound mail as JSON to an HTTP relay.
#[derive(Debug, Clone)]
pub struct WebhookMailer {
    client: Client,
    endpoint: String,
    from: String,
}

impl WebhookMailer {
    /// Build a relay mailer with an explicit request timeout.
    pub fn new(endpoint: &str, from: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build mail relay client", e)
        })?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            from: from.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        let payload = RelayPayload {
            from: &self.from,
            to: &mail.to,
            subject: &mail.subject,
            body: &mail.body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "Mail relay timed out"
                } else {
                    "Mail relay request failed"
                };
                AppError::with_source(ErrorKind::Dependency, message, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::dependency(format!(
                "Mail relay responded with status {}",
                status.as_u16()
            )));
        }

        debug!(to = %mail.to, subject = %mail.subject, "Mail handed to relay");
        Ok(())
    }
}
