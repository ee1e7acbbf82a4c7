//! Validation of donor-submitted donation input.
//!
//! Checks run in a fixed order and the first failure is reported:
//! required fields, then enum membership, then numeric range, then the
//! expiry date itself.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_entity::donation::{
    CreateDonation, Donation, DonationStatus, FoodType, PickupAddress, PickupTimeSlot,
    QuantityUnit,
};

/// Validate `input` and build the donation `donor_id` is listing.
///
/// Any status in the input is ignored; new donations are always `available`.
pub fn build_donation(
    input: CreateDonation,
    donor_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Donation> {
    let title = required("title", input.title)?;
    let description = required("description", input.description)?;
    let food_type = required("foodType", input.food_type)?;
    let quantity = input
        .quantity
        .ok_or_else(|| AppError::missing_field("quantity"))?;
    let quantity_unit = required("quantityUnit", input.quantity_unit)?;
    let expiry_date = required("expiryDate", input.expiry_date)?;

    let address = input
        .pickup_address
        .ok_or_else(|| AppError::missing_field("pickupAddress"))?;
    let street = required("pickupAddress.street", address.street)?;
    let city = required("pickupAddress.city", address.city)?;
    let state = required("pickupAddress.state", address.state)?;
    let zip_code = required("pickupAddress.zipCode", address.zip_code)?;

    let slot = input
        .pickup_time_slot
        .ok_or_else(|| AppError::missing_field("pickupTimeSlot"))?;
    let from = required("pickupTimeSlot.from", slot.from)?;
    let to = required("pickupTimeSlot.to", slot.to)?;

    let food_type: FoodType = food_type.parse()?;
    let quantity_unit: QuantityUnit = quantity_unit.parse()?;

    if !quantity.is_finite() || quantity < 0.0 {
        return Err(AppError::invalid_field(
            "quantity",
            "Quantity must be a non-negative number",
        ));
    }

    let expiry_date = parse_expiry(&expiry_date)?;
    if expiry_date < now {
        return Err(AppError::invalid_field(
            "expiryDate",
            "Expiry date must not be in the past",
        ));
    }

    Ok(Donation {
        id: Uuid::new_v4(),
        title,
        description,
        donor_id,
        accepted_by: None,
        accepted_at: None,
        status: DonationStatus::Available,
        food_type,
        quantity,
        quantity_unit,
        expiry_date,
        pickup_address: PickupAddress {
            street,
            city,
            state,
            zip_code,
        },
        pickup_time_slot: PickupTimeSlot { from, to },
        special_instructions: input
            .special_instructions
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        images: input.images,
        created_at: now,
        updated_at: now,
    })
}

/// Trimmed value of a required text field.
fn required(field: &str, value: Option<String>) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}

/// Accepts an RFC 3339 timestamp, or a `YYYY-MM-DD` date meaning the end of
/// that day in UTC.
fn parse_expiry(raw: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(end_of_day).and_utc())
        .map_err(|_| {
            AppError::invalid_field(
                "expiryDate",
                format!("Invalid expiryDate '{raw}'; expected RFC 3339 or YYYY-MM-DD"),
            )
        })
}
