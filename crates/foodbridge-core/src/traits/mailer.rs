//! External messaging channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A single outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub body: String,
}

impl OutgoingMail {
    /// Create a new message.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Fire-and-forget delivery of outbound mail.
///
/// Implementations report transport failures as
/// [`ErrorKind::Dependency`](crate::error::ErrorKind::Dependency) errors;
/// callers decide whether a failure is fatal.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one message.
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()>;
}
