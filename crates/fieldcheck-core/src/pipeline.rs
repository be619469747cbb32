//! # Field Pipeline
//!
//! The fitted classifier: normalize the value, vectorize the field name and
//! the value independently, stack the two rows and score them with a linear
//! model.

use crate::classifier::LinearClassifier;
use crate::error::{FieldcheckError, Result};
use crate::text::{SparseVector, TfidfVectorizer, ValueNormalizer};
use crate::types::{BugReport, FieldTags, QualityTag, TrackedField};

/// A trained `(field, value) -> QualityTag` pipeline.
#[derive(Debug, Clone)]
pub struct FieldPipeline {
    normalizer: ValueNormalizer,
    field_vectorizer: TfidfVectorizer,
    value_vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
    tags: Vec<QualityTag>,
}

impl FieldPipeline {
    /// Assembles a pipeline from fitted parts.
    ///
    /// # Errors
    ///
    /// Fails if the classifier's input dimension is not the sum of the two
    /// vectorizer dimensions, or if a class name is not a quality tag.
    pub fn new(
        normalizer: ValueNormalizer,
        field_vectorizer: TfidfVectorizer,
        value_vectorizer: TfidfVectorizer,
        classifier: LinearClassifier,
    ) -> Result<Self> {
        classifier.validate()?;
        let expected = field_vectorizer.dim() + value_vectorizer.dim();
        if classifier.dim != expected {
            return Err(FieldcheckError::DimensionMismatch {
                expected,
                actual: classifier.dim,
            });
        }
        let tags = classifier
            .classes
            .iter()
            .map(|c| c.parse::<QualityTag>())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            normalizer,
            field_vectorizer,
            value_vectorizer,
            classifier,
            tags,
        })
    }

    pub fn normalizer(&self) -> &ValueNormalizer {
        &self.normalizer
    }

    pub fn field_vectorizer(&self) -> &TfidfVectorizer {
        &self.field_vectorizer
    }

    pub fn value_vectorizer(&self) -> &TfidfVectorizer {
        &self.value_vectorizer
    }

    pub fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }

    /// Tags the classifier can emit, in class order.
    pub fn tags(&self) -> &[QualityTag] {
        &self.tags
    }

    /// Feature row for a raw `(field, value)` pair.
    pub fn featurize(&self, field: &str, value: &str) -> SparseVector {
        let normalized = self.normalizer.apply(field, value);
        self.featurize_normalized(field, &normalized)
    }

    /// Feature row for a value that has already been normalized.
    pub fn featurize_normalized(&self, field: &str, normalized: &str) -> SparseVector {
        let field_row = self.field_vectorizer.transform(field);
        let value_row = self.value_vectorizer.transform(normalized);
        SparseVector::hstack(&[&field_row, &value_row])
    }

    /// Predicts the quality of `value` entered into `field`.
    pub fn predict(&self, field: TrackedField, value: &str) -> Result<QualityTag> {
        self.predict_named(field.as_str(), value)
    }

    /// Like [`FieldPipeline::predict`], with the field given by wire name.
    /// Unknown names are scored as-is; their field features are all zero.
    pub fn predict_named(&self, field: &str, value: &str) -> Result<QualityTag> {
        let x = self.featurize(field, value);
        let idx = self.classifier.predict_index(&x)?;
        Ok(self.tags[idx])
    }

    /// Scores every tracked field of a report.
    pub fn validate_report(&self, report: &BugReport) -> Result<FieldTags> {
        TrackedField::ALL
            .into_iter()
            .map(|field| Ok((field, self.predict(field, report.value(field))?)))
            .collect()
    }
}
