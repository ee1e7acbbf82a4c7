//! # foodbridge-service
//!
//! Business logic service layer for FoodBridge. The donation lifecycle
//! engine, admin account management, the notification dispatcher and the
//! dashboard reporter live here.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references to the store traits.

pub mod context;
pub mod donation;
pub mod notification;
pub mod report;
pub mod user;

pub use context::RequestContext;
pub use donation::DonationService;
pub use notification::{NotificationDispatcher, NotificationService};
pub use report::DashboardService;
pub use user::{AdminUserService, UserService};
