//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Which transport delivers outbound mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Write messages to the log only.
    #[default]
    Log,
    /// POST messages as JSON to a relay endpoint.
    Webhook,
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transport.
    #[serde(default)]
    pub provider: MailProvider,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from: String,
    /// Relay endpoint for the webhook provider.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Relay request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            from: default_from(),
            webhook_url: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_from() -> String {
    "no-reply@foodbridge.local".to_string()
}

fn default_timeout() -> u64 {
    10
}
