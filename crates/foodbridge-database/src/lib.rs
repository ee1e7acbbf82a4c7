//! # foodbridge-database
//!
//! Store traits for users, donations and notifications, with a PostgreSQL
//! implementation (`repositories`) and an in-memory one (`memory`).

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{DonationRepository, NotificationRepository, UserRepository};
pub use store::{
    DonationFilter, DonationStore, MonthlyCount, NotificationStore, UserStore,
};
