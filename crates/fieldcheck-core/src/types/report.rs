use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::TrackedField;
use super::label::{CoarseLabel, QualityTag};

/// Per-field quality tags keyed by field.
pub type FieldTags = BTreeMap<TrackedField, QualityTag>;

/// A submitted bug report, as stored in the generated corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugReport {
    // Absent keys read as empty values.
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub feedback_type: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub steps_to_reproduce: String,
    #[serde(default)]
    pub expected_behavior: String,
    #[serde(default)]
    pub actual_behavior: String,
    #[serde(default)]
    pub screenshot_provided: bool,

    /// Whole-report label.
    pub label: CoarseLabel,

    /// Per-field quality tags, when the generator recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldTags>,
}

impl BugReport {
    /// Returns the value of a tracked field.
    #[must_use]
    pub fn value(&self, field: TrackedField) -> &str {
        match field {
            TrackedField::FullName => &self.full_name,
            TrackedField::Email => &self.email,
            TrackedField::FeedbackType => &self.feedback_type,
            TrackedField::AppVersion => &self.app_version,
            TrackedField::StepsToReproduce => &self.steps_to_reproduce,
            TrackedField::ExpectedBehavior => &self.expected_behavior,
            TrackedField::ActualBehavior => &self.actual_behavior,
        }
    }

    /// Mutable access to the value of a tracked field.
    pub fn value_mut(&mut self, field: TrackedField) -> &mut String {
        match field {
            TrackedField::FullName => &mut self.full_name,
            TrackedField::Email => &mut self.email,
            TrackedField::FeedbackType => &mut self.feedback_type,
            TrackedField::AppVersion => &mut self.app_version,
            TrackedField::StepsToReproduce => &mut self.steps_to_reproduce,
            TrackedField::ExpectedBehavior => &mut self.expected_behavior,
            TrackedField::ActualBehavior => &mut self.actual_behavior,
        }
    }

    /// How this report is labeled.
    #[must_use]
    pub fn labeling(&self) -> Labeling {
        match &self.errors {
            Some(fields) if !fields.is_empty() => Labeling::PerField {
                coarse: self.label,
                fields: fields.clone(),
            },
            _ => Labeling::Coarse(self.label),
        }
    }

    /// One quality tag per tracked field, in [`TrackedField::ALL`] order.
    ///
    /// Per-field tags are used as recorded; fields missing from the map are
    /// `ok`. Without per-field tags each field is tagged from its own value:
    /// blank values are `missing`, anything else gets the coarse label's
    /// implied tag, except that `incomplete` never marks a non-blank value
    /// `missing` and leaves it `ok`.
    #[must_use]
    pub fn resolved_tags(&self) -> [QualityTag; TrackedField::COUNT] {
        match self.labeling() {
            Labeling::PerField { fields, .. } => TrackedField::ALL
                .map(|field| fields.get(&field).copied().unwrap_or_default()),
            Labeling::Coarse(coarse) => TrackedField::ALL.map(|field| {
                if self.value(field).trim().is_empty() {
                    return QualityTag::Missing;
                }
                match coarse.implied_tag() {
                    QualityTag::Missing => QualityTag::Ok,
                    tag => tag,
                }
            }),
        }
    }
}

/// The two shapes a labeled report can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Labeling {
    /// Only the whole-report label is known.
    Coarse(CoarseLabel),
    /// The generator recorded a tag per field.
    PerField {
        coarse: CoarseLabel,
        fields: FieldTags,
    },
}

impl Labeling {
    #[must_use]
    pub fn coarse(&self) -> CoarseLabel {
        match self {
            Self::Coarse(coarse) | Self::PerField { coarse, .. } => *coarse,
        }
    }
}
