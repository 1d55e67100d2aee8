//! Input validation helpers
//!
//! Required-field checks for create/join payloads. A missing field is
//! reported as `<field>_required` with HTTP 400, where `<field>` is the
//! camelCase wire name of the field.

use crate::utils::AppError;

// ── Required-field helpers (CRUD handlers) ──────────────────────────

/// Unwrap a required field, or report `<field>_required`.
///
/// Presence check only. Queue join uses this for all fields so that
/// empty strings and zero counts pass through unchanged.
pub fn require<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::required(field))
}

/// Required text: present and non-blank.
pub fn require_text(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::required(field)),
    }
}

/// Required count: present and at least one.
pub fn require_count(field: &str, value: Option<i64>) -> Result<i64, AppError> {
    match value {
        Some(v) if v > 0 => Ok(v),
        _ => Err(AppError::required(field)),
    }
}

/// Required list: present and non-empty.
pub fn require_vec<T>(field: &str, value: Option<Vec<T>>) -> Result<Vec<T>, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::required(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_field_name() {
        let err = require::<String>("email", None).unwrap_err();
        assert!(matches!(err, AppError::RequiredField(f) if f == "email"));
    }

    #[test]
    fn require_passes_empty_text_through() {
        // Presence-only semantics: an empty string is still present.
        assert_eq!(require("name", Some(String::new())).unwrap(), "");
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("name", Some("  ".to_string())).is_err());
        assert_eq!(require_text("name", Some("Ana".to_string())).unwrap(), "Ana");
    }

    #[test]
    fn require_count_rejects_zero() {
        assert!(require_count("guests", Some(0)).is_err());
        assert!(require_count("guests", None).is_err());
        assert_eq!(require_count("guests", Some(4)).unwrap(), 4);
    }

    #[test]
    fn require_vec_rejects_empty() {
        assert!(require_vec::<i64>("items", Some(vec![])).is_err());
        assert_eq!(require_vec("items", Some(vec![1])).unwrap(), vec![1]);
    }
}
