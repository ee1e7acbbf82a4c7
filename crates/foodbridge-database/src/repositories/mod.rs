//! PostgreSQL implementations of the store traits.

pub mod donation;
pub mod notification;
pub mod user;

pub use donation::DonationRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
