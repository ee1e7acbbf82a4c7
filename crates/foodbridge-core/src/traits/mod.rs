//! Outbound traits defined in `foodbridge-core` and implemented by other crates.

pub mod mailer;

pub use mailer::{Mailer, OutgoingMail};
