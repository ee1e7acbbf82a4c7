//! Donation entity and enums.

pub mod food_type;
pub mod model;
pub mod status;
pub mod unit;

pub use food_type::FoodType;
pub use model::{
    CreateDonation, CreatePickupAddress, CreatePickupTimeSlot, Donation, PickupAddress,
    PickupTimeSlot,
};
pub use status::DonationStatus;
pub use unit::QuantityUnit;
