//! # TF-IDF Vectorizer
//!
//! Counts analyzer terms, weights them by smoothed inverse document
//! frequency and L2-normalizes each row.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analyzer::{Analyzer, AnalyzerConfig};
use super::sparse::SparseVector;
use crate::error::{FieldcheckError, Result};

/// Fit-time settings for a vectorizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TfidfConfig {
    pub analyzer: AnalyzerConfig,
    /// Keep only this many of the most frequent terms.
    pub max_features: Option<usize>,
}

impl TfidfConfig {
    pub fn new(analyzer: AnalyzerConfig) -> Self {
        Self {
            analyzer,
            max_features: None,
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features.max(1));
        self
    }
}

/// The fitted state of a vectorizer, as plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfModel {
    pub analyzer: AnalyzerConfig,
    /// Term to column. Columns are assigned in term order.
    pub vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column.
    pub idf: Vec<f32>,
}

impl TfidfModel {
    /// Checks that vocabulary columns and idf weights line up.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(FieldcheckError::EmptyVocabulary);
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(FieldcheckError::DimensionMismatch {
                expected: self.vocabulary.len(),
                actual: self.idf.len(),
            });
        }
        let mut seen = vec![false; self.idf.len()];
        for &col in self.vocabulary.values() {
            match seen.get_mut(col) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(FieldcheckError::InvalidModel(format!(
                        "vocabulary column {col} is out of range or repeated"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A fitted TF-IDF vectorizer ready to transform text.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    model: TfidfModel,
    analyzer: Analyzer,
}

impl TfidfVectorizer {
    /// Learns vocabulary and idf weights from `docs`.
    ///
    /// # Errors
    ///
    /// Returns `FieldcheckError::EmptyVocabulary` if no document produced
    /// any term.
    pub fn fit<S: AsRef<str>>(config: TfidfConfig, docs: &[S]) -> Result<Self> {
        let analyzer = Analyzer::new(config.analyzer)?;

        // term -> (total count, document count)
        let mut stats: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for doc in docs {
            let terms = analyzer.analyze(doc.as_ref());
            let mut in_doc: HashSet<&str> = HashSet::new();
            for term in &terms {
                let entry = stats.entry(term.clone()).or_insert((0, 0));
                entry.0 += 1;
                if in_doc.insert(term.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        if stats.is_empty() {
            return Err(FieldcheckError::EmptyVocabulary);
        }

        let mut kept: Vec<(String, (usize, usize))> = stats.into_iter().collect();
        if let Some(max) = config.max_features {
            if kept.len() > max {
                // most frequent first; equal counts stay in term order
                kept.sort_by(|(ta, (ca, _)), (tb, (cb, _))| cb.cmp(ca).then_with(|| ta.cmp(tb)));
                kept.truncate(max);
                kept.sort_by(|a, b| a.0.cmp(&b.0));
            }
        }

        let n_docs = docs.len() as f32;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (col, (term, (_, df))) in kept.into_iter().enumerate() {
            vocabulary.insert(term, col);
            idf.push(((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0);
        }

        debug!(
            terms = vocabulary.len(),
            docs = docs.len(),
            "fitted tf-idf vocabulary"
        );

        Ok(Self {
            model: TfidfModel {
                analyzer: config.analyzer,
                vocabulary,
                idf,
            },
            analyzer,
        })
    }

    /// Rebuilds a vectorizer from its serialized state.
    pub fn from_model(model: TfidfModel) -> Result<Self> {
        model.validate()?;
        let analyzer = Analyzer::new(model.analyzer)?;
        Ok(Self { model, analyzer })
    }

    pub fn model(&self) -> &TfidfModel {
        &self.model
    }

    pub fn into_model(self) -> TfidfModel {
        self.model
    }

    /// Output dimension (vocabulary size).
    pub fn dim(&self) -> usize {
        self.model.idf.len()
    }

    /// Vectorizes a single document. Unknown terms are ignored, so text
    /// made only of unseen terms maps to the zero vector.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in self.analyzer.analyze(doc) {
            if let Some(&col) = self.model.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.model.idf[col]))
            .collect();

        let mut row = SparseVector::from_entries(self.dim(), entries)
            .unwrap_or_else(|_| SparseVector::zeros(self.dim()));
        row.l2_normalize();
        row
    }

    pub fn transform_many<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseVector> {
        docs.iter().map(|d| self.transform(d.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> TfidfConfig {
        TfidfConfig::new(AnalyzerConfig::words())
    }

    #[test]
    fn default_config_is_uncapped_word_unigrams() {
        let config = TfidfConfig::default();
        assert_eq!(config.analyzer, AnalyzerConfig::words());
        assert_eq!(config.max_features, None);
    }

    #[test]
    fn vocabulary_is_sorted() {
        let vec = TfidfVectorizer::fit(words(), &["beta alpha", "gamma alpha"]).unwrap();
        let cols: Vec<_> = vec.model().vocabulary.iter().map(|(t, c)| (t.as_str(), *c)).collect();
        assert_eq!(cols, vec![("alpha", 0), ("beta", 1), ("gamma", 2)]);
    }

    #[test]
    fn smooth_idf_values() {
        let vec = TfidfVectorizer::fit(words(), &["beta alpha", "gamma alpha"]).unwrap();
        let idf = &vec.model().idf;
        // alpha appears in both docs: ln(3/3) + 1
        assert!((idf[0] - 1.0).abs() < 1e-6);
        // beta in one: ln(3/2) + 1
        assert!((idf[1] - (1.5f32.ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn rows_are_unit_length() {
        let vec = TfidfVectorizer::fit(words(), &["beta alpha", "gamma alpha alpha"]).unwrap();
        let row = vec.transform("alpha alpha gamma");
        assert!((row.norm() - 1.0).abs() < 1e-5);
        assert_eq!(row.nnz(), 2);
    }

    #[test]
    fn unknown_terms_map_to_zero() {
        let vec = TfidfVectorizer::fit(words(), &["beta alpha"]).unwrap();
        assert!(vec.transform("delta epsilon").is_zero());
    }

    #[test]
    fn max_features_keeps_most_frequent() {
        let config = words().with_max_features(2);
        let vec = TfidfVectorizer::fit(config, &["aa aa aa bb", "cc aa bb", "dd"]).unwrap();
        let terms: Vec<_> = vec.model().vocabulary.keys().cloned().collect();
        assert_eq!(terms, vec!["aa", "bb"]);
        assert_eq!(vec.dim(), 2);
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let err = TfidfVectorizer::fit(words(), &["", "a b"]).unwrap_err();
        assert!(matches!(err, FieldcheckError::EmptyVocabulary));
    }

    #[test]
    fn model_roundtrip_transforms_identically() {
        let config = TfidfConfig::new(AnalyzerConfig::words().with_char_ngrams(2, 3));
        let vec = TfidfVectorizer::fit(config, &["ver42", "v1.2.3", "version100"]).unwrap();
        let json = serde_json::to_string(vec.model()).unwrap();
        let restored = TfidfVectorizer::from_model(serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(vec.transform("ver17"), restored.transform("ver17"));
    }

    #[test]
    fn corrupt_model_is_rejected() {
        let vec = TfidfVectorizer::fit(words(), &["beta alpha"]).unwrap();
        let mut model = vec.into_model();
        model.idf.pop();
        assert!(TfidfVectorizer::from_model(model).is_err());
    }
}
