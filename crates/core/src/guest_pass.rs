//! Guest pass lifecycle rules.
//!
//! A resident registers a visitor and receives an opaque access token. At
//! the gate, security staff resolve the token (scanned or typed) and the
//! pass advances `expected -> arrived`. Check-out advances
//! `arrived -> departed`. Passes never move backwards.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::GuestStatus;
use crate::validation::{optional_text, parse_iso_date, require_text};

/// Number of characters in a generated access token.
pub const TOKEN_LENGTH: usize = 10;

/// Upper-case letters and digits without the easily confused `0 O 1 I`.
const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// How many fresh tokens to try before giving up on a unique-key collision.
pub const MAX_TOKEN_ATTEMPTS: usize = 5;

/// Generate a random access token for a new guest pass.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

impl GuestStatus {
    /// Whether a pass in this status may move to `next`.
    pub fn can_advance_to(self, next: GuestStatus) -> bool {
        matches!(
            (self, next),
            (GuestStatus::Expected, GuestStatus::Arrived)
                | (GuestStatus::Arrived, GuestStatus::Departed)
        )
    }
}

/// Validated input for a new guest pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub full_name: String,
    pub plate_number: Option<String>,
    pub visit_date: NaiveDate,
}

/// Validate raw form input for a new guest pass.
///
/// The name is required, the plate is optional (blank means none), and the
/// visit date must be a `YYYY-MM-DD` calendar date.
pub fn validate_new_guest(
    full_name: &str,
    plate_number: Option<&str>,
    visit_date: &str,
) -> Result<NewGuest, CoreError> {
    Ok(NewGuest {
        full_name: require_text("full_name", full_name)?,
        plate_number: optional_text(plate_number),
        visit_date: parse_iso_date("visit_date", visit_date)?,
    })
}

/// Trim a scanned or typed token. Empty input is a validation error, not a
/// denial, so the operator is asked to enter a code.
pub fn normalize_token(raw: &str) -> Result<&str, CoreError> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(CoreError::Validation("Token must not be empty".into()));
    }
    Ok(token)
}

/// Why a token did not grant entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInRejection {
    /// No pass carries this token.
    Denied,
    /// The pass was already checked in.
    AlreadyUsed,
    /// The visit is over; the pass cannot be reused.
    AlreadyDeparted,
}

/// Decide whether a pass found by token lookup may be checked in.
///
/// `None` means the lookup found nothing.
pub fn evaluate_check_in(status: Option<GuestStatus>) -> Result<(), CheckInRejection> {
    match status {
        None => Err(CheckInRejection::Denied),
        Some(GuestStatus::Expected) => Ok(()),
        Some(GuestStatus::Arrived) => Err(CheckInRejection::AlreadyUsed),
        Some(GuestStatus::Departed) => Err(CheckInRejection::AlreadyDeparted),
    }
}

/// Decide whether a pass may be checked out.
pub fn evaluate_check_out(status: GuestStatus) -> Result<(), CoreError> {
    if status.can_advance_to(GuestStatus::Departed) {
        return Ok(());
    }
    Err(CoreError::Conflict(format!(
        "Guest cannot be checked out while '{status}'"
    )))
}

/// Result of resolving a token at the gate, as reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    Granted,
    Denied,
    AlreadyUsed,
    AlreadyDeparted,
}

impl From<CheckInRejection> for GateOutcome {
    fn from(rejection: CheckInRejection) -> Self {
        match rejection {
            CheckInRejection::Denied => GateOutcome::Denied,
            CheckInRejection::AlreadyUsed => GateOutcome::AlreadyUsed,
            CheckInRejection::AlreadyDeparted => GateOutcome::AlreadyDeparted,
        }
    }
}

impl GateOutcome {
    /// Whether the gate should open.
    pub fn is_granted(self) -> bool {
        self == GateOutcome::Granted
    }
}
