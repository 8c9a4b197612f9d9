//! Emergency alert validation.
//!
//! Alerts are broadcast to every connected client, which shows a blocking
//! overlay and reads the message aloud.

use crate::error::CoreError;

pub const ALERT_TYPE_FIRE: &str = "fire";
pub const ALERT_TYPE_EARTHQUAKE: &str = "earthquake";
pub const ALERT_TYPE_FLOOD: &str = "flood";
pub const ALERT_TYPE_SECURITY: &str = "security";
pub const ALERT_TYPE_GENERAL: &str = "general";

pub const VALID_ALERT_TYPES: &[&str] = &[
    ALERT_TYPE_FIRE,
    ALERT_TYPE_EARTHQUAKE,
    ALERT_TYPE_FLOOD,
    ALERT_TYPE_SECURITY,
    ALERT_TYPE_GENERAL,
];

/// Longest message that is still reasonable to read aloud.
pub const MAX_MESSAGE_LEN: usize = 500;

/// Validate an alert before broadcast, returning the trimmed message.
pub fn validate_alert(alert_type: &str, message: &str) -> Result<String, CoreError> {
    if !VALID_ALERT_TYPES.contains(&alert_type) {
        return Err(CoreError::Validation(format!(
            "Invalid alert type '{alert_type}'. Must be one of: {}",
            VALID_ALERT_TYPES.join(", ")
        )));
    }
    let message = crate::validation::require_text("message", message)?;
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_alert_passes() {
        let msg = validate_alert(ALERT_TYPE_FIRE, "  Evacuate block B ").unwrap();
        assert_eq!(msg, "Evacuate block B");
    }

    #[test]
    fn unknown_type_fails() {
        let err = validate_alert("meteor", "Take cover").unwrap_err();
        assert!(err.to_string().contains("Invalid alert type"));
    }

    #[test]
    fn empty_or_long_message_fails() {
        assert!(validate_alert(ALERT_TYPE_GENERAL, " ").is_err());
        assert!(validate_alert(ALERT_TYPE_GENERAL, &"a".repeat(MAX_MESSAGE_LEN + 1)).is_err());
    }
}
