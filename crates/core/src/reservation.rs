//! Facility booking rules.
//!
//! Shared facilities are booked in one-hour slots. A facility, date and slot
//! triple can be held by one reservation only; the database enforces this
//! with `uq_reservations_slot`.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::validation::parse_iso_date;

/// Bookable facilities.
pub const FACILITIES: &[&str] = &[
    "Tennis Court",
    "Sauna",
    "BBQ Area",
    "Meeting Room",
    "Swimming Pool",
    "Gym",
];

/// Slot start times offered each day.
pub const TIME_SLOTS: &[&str] = &[
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00",
    "19:00", "20:00",
];

/// Validated booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub facility_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
}

pub fn validate_facility(facility: &str) -> Result<(), CoreError> {
    if FACILITIES.contains(&facility) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown facility '{facility}'. Must be one of: {}",
            FACILITIES.join(", ")
        )))
    }
}

pub fn validate_time_slot(slot: &str) -> Result<(), CoreError> {
    if TIME_SLOTS.contains(&slot) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid time slot '{slot}'. Slots run hourly from {} to {}",
            TIME_SLOTS[0],
            TIME_SLOTS[TIME_SLOTS.len() - 1]
        )))
    }
}

/// Validate all three parts of a booking request.
pub fn validate_slot_request(
    facility: &str,
    date: &str,
    time_slot: &str,
) -> Result<SlotRequest, CoreError> {
    validate_facility(facility)?;
    validate_time_slot(time_slot)?;
    let date = parse_iso_date("date", date)?;
    Ok(SlotRequest {
        facility_name: facility.to_string(),
        date,
        time_slot: time_slot.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_facility_and_slot_pass() {
        let req = validate_slot_request("Sauna", "2025-01-10", "18:00").unwrap();
        assert_eq!(req.facility_name, "Sauna");
        assert_eq!(req.time_slot, "18:00");
    }

    #[test]
    fn unknown_facility_fails() {
        let err = validate_slot_request("Bowling", "2025-01-10", "18:00").unwrap_err();
        assert!(err.to_string().contains("Unknown facility"));
    }

    #[test]
    fn off_grid_slot_fails() {
        assert!(validate_time_slot("08:00").is_err());
        assert!(validate_time_slot("21:00").is_err());
        assert!(validate_time_slot("12:30").is_err());
    }

    #[test]
    fn slot_grid_is_hourly_nine_to_eight() {
        assert_eq!(TIME_SLOTS.len(), 12);
        assert_eq!(TIME_SLOTS.first(), Some(&"09:00"));
        assert_eq!(TIME_SLOTS.last(), Some(&"20:00"));
    }
}
