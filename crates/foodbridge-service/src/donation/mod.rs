//! Donation lifecycle: creation, acceptance, status updates and queries.

pub mod service;
pub mod validation;

pub use service::DonationService;
