//! Dataset loading and flattening into per-field training examples.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use fieldcheck_core::text::normalize_value;
use fieldcheck_core::{BugReport, QualityTag, TrackedField};

use crate::rng::SeededRng;

/// A single training example: one field of one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub field: TrackedField,
    /// Normalized value.
    pub value: String,
    pub label: QualityTag,
}

impl TrainingExample {
    pub fn new(field: TrackedField, value: impl Into<String>, label: QualityTag) -> Self {
        Self {
            field,
            value: value.into(),
            label,
        }
    }
}

/// Loads a JSON array of bug reports.
pub fn load_reports<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<BugReport>> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("Training data not found: {}", path.display());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let reports: Vec<BugReport> = serde_json::from_str(&content)
        .with_context(|| format!("malformed bug report JSON in {}", path.display()))?;
    Ok(reports)
}

/// One example per report per tracked field, values normalized, labels
/// from [`BugReport::resolved_tags`].
pub fn flatten(reports: &[BugReport]) -> Vec<TrainingExample> {
    let mut examples = Vec::with_capacity(reports.len() * TrackedField::COUNT);
    for report in reports {
        let tags = report.resolved_tags();
        for field in TrackedField::ALL {
            examples.push(TrainingExample::new(
                field,
                normalize_value(field, report.value(field)),
                tags[field.index()],
            ));
        }
    }
    examples
}

/// Distinct labels present, in tag order.
pub fn label_set(examples: &[TrainingExample]) -> Vec<QualityTag> {
    examples
        .iter()
        .map(|e| e.label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fails unless the examples can train a classifier: at least one example
/// and at least two distinct labels.
pub fn ensure_trainable(examples: &[TrainingExample]) -> anyhow::Result<Vec<QualityTag>> {
    if examples.is_empty() {
        bail!("no training examples: the label set is empty");
    }
    let labels = label_set(examples);
    if labels.len() < 2 {
        bail!(
            "need at least two distinct labels to train, found only {:?}",
            labels
        );
    }
    Ok(labels)
}

/// Splits `items` into `(train, test)` with a seeded permutation. The test
/// side gets `ceil(len * test_ratio)` items.
pub fn train_test_split<T: Clone>(items: &[T], test_ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let ratio = test_ratio.clamp(0.0, 1.0);
    let n_test = ((items.len() as f64) * ratio).ceil() as usize;

    let mut indices: Vec<usize> = (0..items.len()).collect();
    SeededRng::new(seed).shuffle(&mut indices);

    let (test_idx, train_idx) = indices.split_at(n_test.min(items.len()));
    let train = train_idx.iter().map(|&i| items[i].clone()).collect();
    let test = test_idx.iter().map(|&i| items[i].clone()).collect();
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_core::text::EMPTY_TOKEN;
    use fieldcheck_core::{CoarseLabel, FieldTags};

    fn report(label: CoarseLabel, errors: Option<FieldTags>) -> BugReport {
        BugReport {
            full_name: "lorem123".into(),
            email: "".into(),
            feedback_type: "Bug".into(),
            app_version: "v1.0.0".into(),
            steps_to_reproduce: "it froze".into(),
            expected_behavior: "should work".into(),
            actual_behavior: "crashed".into(),
            screenshot_provided: false,
            label,
            errors,
        }
    }

    #[test]
    fn flatten_yields_one_example_per_field() {
        let reports = vec![report(CoarseLabel::Vague, None); 3];
        let examples = flatten(&reports);
        assert_eq!(examples.len(), 3 * TrackedField::COUNT);
    }

    #[test]
    fn flatten_normalizes_values() {
        let examples = flatten(&[report(CoarseLabel::Invalid, None)]);
        let name = &examples[TrackedField::FullName.index()];
        assert_eq!(name.value, "lorem123 <HAS_DIGIT>");
        let email = &examples[TrackedField::Email.index()];
        assert_eq!(email.value, "<EMPTY>");
    }

    #[test]
    fn flatten_uses_per_field_tags() {
        let mut errors = FieldTags::new();
        errors.insert(TrackedField::Email, QualityTag::Missing);
        errors.insert(TrackedField::StepsToReproduce, QualityTag::Vague);
        let examples = flatten(&[report(CoarseLabel::Incomplete, Some(errors))]);
        assert_eq!(examples[TrackedField::Email.index()].label, QualityTag::Missing);
        assert_eq!(
            examples[TrackedField::StepsToReproduce.index()].label,
            QualityTag::Vague
        );
        assert_eq!(examples[TrackedField::FeedbackType.index()].label, QualityTag::Ok);
    }

    #[test]
    fn coarse_only_reports_tag_blank_values_missing() {
        let examples = flatten(&[report(CoarseLabel::Invalid, None)]);
        for example in &examples {
            if example.field == TrackedField::Email {
                assert_eq!(example.label, QualityTag::Missing);
            } else {
                assert_eq!(example.label, QualityTag::Invalid);
            }
        }
    }

    #[test]
    fn empty_values_are_always_missing_examples() {
        for label in CoarseLabel::ALL {
            let examples = flatten(&[report(label, None)]);
            for example in &examples {
                assert_eq!(
                    example.value == EMPTY_TOKEN,
                    example.label == QualityTag::Missing,
                    "{label} {}",
                    example.field
                );
            }
        }
    }

    #[test]
    fn empty_examples_are_not_trainable() {
        assert!(ensure_trainable(&[]).is_err());
        let mut filled = report(CoarseLabel::Vague, None);
        filled.email = "someone@example.com".into();
        let single = flatten(&[filled]);
        assert!(ensure_trainable(&single).is_err());
    }

    #[test]
    fn split_is_deterministic_and_sized() {
        let items: Vec<u32> = (0..101).collect();
        let (train_a, test_a) = train_test_split(&items, 0.2, 42);
        let (train_b, test_b) = train_test_split(&items, 0.2, 42);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        assert_eq!(test_a.len(), 21);
        assert_eq!(train_a.len(), 80);

        let mut all: Vec<_> = train_a.iter().chain(&test_a).copied().collect();
        all.sort_unstable();
        assert_eq!(all, items);
    }

    #[test]
    fn different_seed_different_split() {
        let items: Vec<u32> = (0..100).collect();
        let (_, test_a) = train_test_split(&items, 0.2, 1);
        let (_, test_b) = train_test_split(&items, 0.2, 2);
        assert_ne!(test_a, test_b);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_reports("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_reports(&path).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
