//! Small input validators shared by the domain modules.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::CoreError;

/// Dates travel as `YYYY-MM-DD`.
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Trim `value` and reject it when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional value, mapping blank input to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    let value = value.trim();
    if !ISO_DATE_RE.is_match(value) {
        return Err(CoreError::Validation(format!(
            "{field} must use the YYYY-MM-DD format (e.g. 2024-12-25)"
        )));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("{field} is not a valid calendar date")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("name", "  Ayşe  ").unwrap(), "Ayşe");
    }

    #[test]
    fn require_text_rejects_whitespace() {
        assert_matches!(require_text("name", "   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" 34 ABC 12 ")), Some("34 ABC 12".into()));
    }

    #[test]
    fn iso_date_accepts_padded_dates() {
        let date = parse_iso_date("visit_date", "2024-12-25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
    }

    #[test]
    fn iso_date_rejects_unpadded_and_impossible_dates() {
        assert!(parse_iso_date("visit_date", "2024-1-5").is_err());
        assert!(parse_iso_date("visit_date", "25.12.2024").is_err());
        let err = parse_iso_date("visit_date", "2024-02-30").unwrap_err();
        assert!(err.to_string().contains("not a valid calendar date"));
    }
}
