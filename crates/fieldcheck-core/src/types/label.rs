use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldcheckError;

/// Whole-report label assigned by the data generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseLabel {
    /// Every field is well formed.
    Complete,
    /// Free-text descriptions are low-information.
    Vague,
    /// Some fields are blank or degraded.
    Incomplete,
    /// Identity and version fields are malformed.
    Invalid,
}

impl CoarseLabel {
    pub const ALL: [CoarseLabel; 4] = [
        Self::Complete,
        Self::Vague,
        Self::Incomplete,
        Self::Invalid,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Vague => "vague",
            Self::Incomplete => "incomplete",
            Self::Invalid => "invalid",
        }
    }

    /// The per-field tag a report with only a coarse label implies for
    /// each of its fields.
    #[must_use]
    pub fn implied_tag(self) -> QualityTag {
        match self {
            Self::Complete => QualityTag::Ok,
            Self::Vague => QualityTag::Vague,
            Self::Incomplete => QualityTag::Missing,
            Self::Invalid => QualityTag::Invalid,
        }
    }
}

impl fmt::Display for CoarseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoarseLabel {
    type Err = FieldcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| FieldcheckError::UnknownLabel(s.to_string()))
    }
}

/// Quality of a single field value. This is what the classifier predicts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityTag {
    #[default]
    Ok,
    Missing,
    Vague,
    Invalid,
}

impl QualityTag {
    pub const ALL: [QualityTag; 4] = [Self::Ok, Self::Missing, Self::Vague, Self::Invalid];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Missing => "missing",
            Self::Vague => "vague",
            Self::Invalid => "invalid",
        }
    }

    /// Returns `true` for anything that should be flagged to the reporter.
    #[must_use]
    pub fn is_problem(self) -> bool {
        self != Self::Ok
    }
}

impl fmt::Display for QualityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTag {
    type Err = FieldcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| FieldcheckError::UnknownLabel(s.to_string()))
    }
}
