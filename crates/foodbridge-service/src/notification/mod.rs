//! In-app notifications and outbound mail.

pub mod dispatcher;
pub mod mailer;
pub mod service;
pub mod templates;

pub use dispatcher::NotificationDispatcher;
pub use mailer::{LogMailer, WebhookMailer, build_mailer};
pub use service::NotificationService;
