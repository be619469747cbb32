//! Value normalization shared by training and scoring.

use serde::{Deserialize, Serialize};

use crate::types::TrackedField;

/// Stand-in for an empty value, so "nothing was entered" has its own terms.
pub const EMPTY_TOKEN: &str = "<EMPTY>";

/// Appended to names that contain digits.
pub const DIGIT_MARKER: &str = "<HAS_DIGIT>";

/// Rewrites raw field values before vectorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueNormalizer {
    pub empty_token: String,
    pub digit_marker: String,
    /// Wire names of the fields that receive the digit marker.
    pub digit_fields: Vec<String>,
}

impl Default for ValueNormalizer {
    fn default() -> Self {
        Self {
            empty_token: EMPTY_TOKEN.to_string(),
            digit_marker: DIGIT_MARKER.to_string(),
            digit_fields: vec![TrackedField::FullName.as_str().to_string()],
        }
    }
}

impl ValueNormalizer {
    /// Normalizes `value` for the field named `field`.
    ///
    /// Blank (empty or whitespace-only) values become the empty token.
    pub fn apply(&self, field: &str, value: &str) -> String {
        if value.trim().is_empty() {
            return self.empty_token.clone();
        }
        if self.digit_fields.iter().any(|f| f == field) && value.chars().any(|c| c.is_ascii_digit())
        {
            return format!("{value} {}", self.digit_marker);
        }
        value.to_string()
    }
}

/// Normalizes a value with the default rules.
pub fn normalize_value(field: TrackedField, value: &str) -> String {
    ValueNormalizer::default().apply(field.as_str(), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_becomes_sentinel() {
        assert_eq!(normalize_value(TrackedField::Email, ""), EMPTY_TOKEN);
        assert_eq!(normalize_value(TrackedField::Email, "   "), EMPTY_TOKEN);
    }

    #[test]
    fn digits_in_names_are_marked() {
        assert_eq!(
            normalize_value(TrackedField::FullName, "table123"),
            "table123 <HAS_DIGIT>"
        );
        assert_eq!(normalize_value(TrackedField::FullName, "Ada Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn digits_elsewhere_untouched() {
        assert_eq!(normalize_value(TrackedField::AppVersion, "v1.2.3"), "v1.2.3");
    }
}
