//! Common validation utilities.

use validator::ValidationError;

/// Minimum length for a new admin passcode.
pub const MIN_PASSCODE_LEN: usize = 8;

/// Validates that a required text field is non-empty after trimming.
pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("non_blank");
        err.message = Some("Field must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates the new-passcode policy (at least [`MIN_PASSCODE_LEN`] characters).
///
/// Enforced at the HTTP boundary before the auth service is called; the
/// service itself accepts any string.
pub fn validate_new_passcode(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSCODE_LEN {
        let mut err = ValidationError::new("passcode_length");
        err.message = Some("New password must be at least 8 characters long".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_accepts_text() {
        assert!(validate_non_blank("Industrial UPS inquiry").is_ok());
    }

    #[test]
    fn test_non_blank_rejects_empty() {
        assert!(validate_non_blank("").is_err());
    }

    #[test]
    fn test_non_blank_rejects_whitespace_only() {
        assert!(validate_non_blank("   \t\n").is_err());
    }

    #[test]
    fn test_new_passcode_minimum_length() {
        assert!(validate_new_passcode("short").is_err());
        assert!(validate_new_passcode("1234567").is_err());
        assert!(validate_new_passcode("12345678").is_ok());
        assert!(validate_new_passcode("newpass123").is_ok());
    }

    #[test]
    fn test_new_passcode_counts_chars_not_bytes() {
        // 8 multibyte characters pass even though the byte length differs.
        assert!(validate_new_passcode("ääääääää").is_ok());
    }
}
