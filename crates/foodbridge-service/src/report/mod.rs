//! Read-only aggregate reporting.

pub mod dashboard;

pub use dashboard::{DashboardService, DashboardStats, MonthBucket};
