use super::errors::PolicyError;

/// Minimum acceptability rules for a plaintext secret.
///
/// Rules are reported in a fixed order so the same input always yields
/// the same error: non-empty, minimum length, an upper-case letter,
/// a character outside ASCII `[a-zA-Z0-9]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    pub const DEFAULT_MIN_LENGTH: usize = 8;

    pub fn new() -> Self {
        Self {
            min_length: Self::DEFAULT_MIN_LENGTH,
        }
    }

    /// Check a plaintext secret against the policy.
    ///
    /// Scans the input once, recording which character classes occur,
    /// then reports the first violated rule.
    ///
    /// # Errors
    /// * `Empty` - Secret is the empty string
    /// * `TooShort` - Fewer characters than the minimum length
    /// * `MissingUppercase` - No upper-case letter
    /// * `MissingSpecialCharacter` - Only ASCII letters and digits
    pub fn validate(&self, plaintext: &str) -> Result<(), PolicyError> {
        if plaintext.is_empty() {
            return Err(PolicyError::Empty);
        }

        let mut length = 0;
        let mut has_uppercase = false;
        let mut has_special = false;
        for c in plaintext.chars() {
            length += 1;
            has_uppercase |= c.is_uppercase();
            has_special |= !c.is_ascii_alphanumeric();
        }

        if length < self.min_length {
            return Err(PolicyError::TooShort {
                min: self.min_length,
                actual: length,
            });
        }
        if !has_uppercase {
            return Err(PolicyError::MissingUppercase);
        }
        if !has_special {
            return Err(PolicyError::MissingSpecialCharacter);
        }

        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_compliant_password() {
        let policy = PasswordPolicy::new();
        assert_eq!(policy.validate("Abcdefg!1"), Ok(()));
        assert_eq!(policy.validate("Pass word"), Ok(()));
    }

    #[test]
    fn test_rejects_empty() {
        let policy = PasswordPolicy::new();
        assert_eq!(policy.validate(""), Err(PolicyError::Empty));
    }

    #[test]
    fn test_rejects_short() {
        let policy = PasswordPolicy::new();
        assert_eq!(
            policy.validate("Ab!1"),
            Err(PolicyError::TooShort { min: 8, actual: 4 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let policy = PasswordPolicy::new();
        // Seven characters, fourteen bytes
        assert_eq!(
            policy.validate("ÄÖÜäöü!"),
            Err(PolicyError::TooShort { min: 8, actual: 7 })
        );
    }

    #[test]
    fn test_rejects_missing_uppercase() {
        let policy = PasswordPolicy::new();
        assert_eq!(
            policy.validate("abcdefg1"),
            Err(PolicyError::MissingUppercase)
        );
    }

    #[test]
    fn test_rejects_missing_special_character() {
        let policy = PasswordPolicy::new();
        assert_eq!(
            policy.validate("Abcdefg1"),
            Err(PolicyError::MissingSpecialCharacter)
        );
    }

    #[test]
    fn test_non_ascii_letter_counts_as_special() {
        let policy = PasswordPolicy::new();
        assert_eq!(policy.validate("Abcdefgé"), Ok(()));
        assert_eq!(policy.validate("Straße12"), Ok(()));
    }

    #[test]
    fn test_reports_first_failing_rule() {
        let policy = PasswordPolicy::new();
        // Short, no upper-case and no special character: length is reported
        assert!(matches!(
            policy.validate("abc"),
            Err(PolicyError::TooShort { .. })
        ));
        // Long enough but lacking both classes: upper-case is reported
        assert_eq!(
            policy.validate("abcdefgh"),
            Err(PolicyError::MissingUppercase)
        );
    }
}
