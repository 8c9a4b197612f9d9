//! Support tickets and on-site service logs.

use crate::error::CoreError;
use crate::status::{ServiceLogStatus, ServiceRequestStatus};

/// Maximum description length accepted for a support ticket.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

impl ServiceRequestStatus {
    /// Tickets move forward only. A pending ticket may be resolved directly.
    pub fn can_advance_to(self, next: ServiceRequestStatus) -> bool {
        use crate::status::ServiceRequestStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (Pending, Resolved) | (InProgress, Resolved)
        )
    }

    /// Statuses shown on staff work queues.
    pub const OPEN: &'static [ServiceRequestStatus] =
        &[ServiceRequestStatus::Pending, ServiceRequestStatus::InProgress];
}

/// Check a ticket status change, returning a conflict for a backward move.
pub fn validate_status_change(
    current: ServiceRequestStatus,
    next: ServiceRequestStatus,
) -> Result<(), CoreError> {
    if current.can_advance_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Service request cannot move from '{current}' to '{next}'"
        )))
    }
}

/// Validate a ticket description.
pub fn validate_description(description: &str) -> Result<String, CoreError> {
    let description = crate::validation::require_text("description", description)?;
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(description)
}

/// A service log can be completed once.
pub fn validate_log_completion(status: ServiceLogStatus) -> Result<(), CoreError> {
    match status {
        ServiceLogStatus::Pending => Ok(()),
        ServiceLogStatus::Completed => Err(CoreError::Conflict(
            "Service log is already completed".into(),
        )),
    }
}

/// Validate a WGS84 coordinate pair.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "Coordinates out of range: ({latitude}, {longitude})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ServiceRequestStatus::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(validate_status_change(Pending, InProgress).is_ok());
        assert!(validate_status_change(InProgress, Resolved).is_ok());
        assert!(validate_status_change(Pending, Resolved).is_ok());
    }

    #[test]
    fn backward_and_same_transitions_rejected() {
        assert!(validate_status_change(Resolved, Pending).is_err());
        assert!(validate_status_change(InProgress, Pending).is_err());
        assert!(validate_status_change(Pending, Pending).is_err());
    }

    #[test]
    fn description_limits() {
        assert!(validate_description("  ").is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
        assert_eq!(validate_description(" Leaking tap ").unwrap(), "Leaking tap");
    }

    #[test]
    fn completed_log_cannot_complete_again() {
        assert!(validate_log_completion(ServiceLogStatus::Pending).is_ok());
        assert!(validate_log_completion(ServiceLogStatus::Completed).is_err());
    }

    #[test]
    fn coordinates_range() {
        assert!(validate_coordinates(41.0, 29.0).is_ok());
        assert!(validate_coordinates(91.0, 29.0).is_err());
        assert!(validate_coordinates(41.0, -181.0).is_err());
    }
}
