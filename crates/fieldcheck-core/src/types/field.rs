use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldcheckError;

/// A bug report field the classifier scores.
///
/// `screenshotProvided` is deliberately absent: it is a boolean and carries
/// no free text to judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    FullName,
    Email,
    FeedbackType,
    AppVersion,
    StepsToReproduce,
    ExpectedBehavior,
    ActualBehavior,
}

impl TrackedField {
    /// Number of tracked fields.
    pub const COUNT: usize = 7;

    /// All tracked fields in canonical order.
    pub const ALL: [TrackedField; Self::COUNT] = [
        Self::FullName,
        Self::Email,
        Self::FeedbackType,
        Self::AppVersion,
        Self::StepsToReproduce,
        Self::ExpectedBehavior,
        Self::ActualBehavior,
    ];

    /// The wire name of the field, as it appears in report JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::FeedbackType => "feedbackType",
            Self::AppVersion => "appVersion",
            Self::StepsToReproduce => "stepsToReproduce",
            Self::ExpectedBehavior => "expectedBehavior",
            Self::ActualBehavior => "actualBehavior",
        }
    }

    /// Position of this field in [`TrackedField::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for the free-text description fields.
    #[must_use]
    pub fn is_free_text(self) -> bool {
        matches!(
            self,
            Self::StepsToReproduce | Self::ExpectedBehavior | Self::ActualBehavior
        )
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackedField {
    type Err = FieldcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldcheckError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_canonical_order() {
        for (i, field) in TrackedField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!(
            "stepsToReproduce".parse::<TrackedField>().unwrap(),
            TrackedField::StepsToReproduce
        );
        assert!("steps_to_reproduce".parse::<TrackedField>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&TrackedField::AppVersion).unwrap();
        assert_eq!(json, "\"appVersion\"");
        for field in TrackedField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn free_text_fields() {
        let free: Vec<_> = TrackedField::ALL
            .into_iter()
            .filter(|f| f.is_free_text())
            .collect();
        assert_eq!(free.len(), 3);
        assert!(!TrackedField::Email.is_free_text());
    }
}
