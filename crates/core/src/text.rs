//! Helpers for free-text input fields.

use crate::error::{DomainError, DomainResult};

/// Trim a required field; blank input is a validation failure.
pub fn required(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional field; blank input collapses to `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Case-sensitive substring match used by every list/search view.
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_collapses_blank_to_none() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" dock 4 ".into())), Some("dock 4".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn contains_is_case_sensitive() {
        assert!(contains("Main Warehouse", "Ware"));
        assert!(!contains("Main Warehouse", "ware"));
    }
}
