//! User domain entities.

pub mod model;
pub mod role;
pub mod status;

pub use model::{OrganizationDetails, UpdateProfile, User, UserAddress};
pub use role::UserRole;
pub use status::VerificationStatus;
