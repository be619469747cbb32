//! Reference runtime for scoring graphs.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::{malformed, Node, ScoringGraph, INPUT_FIELD, INPUT_VALUE, OUTPUT_LABEL};
use crate::classifier::LinearClassifier;
use crate::error::Result;
use crate::text::{SparseVector, TfidfVectorizer, ValueNormalizer};

enum Step {
    Normalize {
        field: String,
        value: String,
        output: String,
        normalizer: ValueNormalizer,
    },
    Tfidf {
        input: String,
        output: String,
        vectorizer: TfidfVectorizer,
    },
    Concat {
        inputs: Vec<String>,
        output: String,
    },
    Classify {
        input: String,
        output: String,
        classifier: LinearClassifier,
    },
}

enum Tensor {
    Text(String),
    Features(SparseVector),
}

/// A validated graph with its vectorizers compiled, ready to score.
pub struct ScoringSession {
    steps: Vec<Step>,
}

impl ScoringSession {
    /// Validates `graph` and prepares it for scoring.
    pub fn new(graph: ScoringGraph) -> Result<Self> {
        graph.validate()?;

        let steps = graph
            .nodes
            .into_iter()
            .map(|node| {
                Ok(match node {
                    Node::NormalizeValue {
                        field,
                        value,
                        output,
                        normalizer,
                        ..
                    } => Step::Normalize {
                        field,
                        value,
                        output,
                        normalizer,
                    },
                    Node::TfidfVectorizer {
                        input,
                        output,
                        model,
                        ..
                    } => Step::Tfidf {
                        input,
                        output,
                        vectorizer: TfidfVectorizer::from_model(model)?,
                    },
                    Node::Concat { inputs, output, .. } => Step::Concat { inputs, output },
                    Node::LinearClassifier {
                        input,
                        output,
                        model,
                        ..
                    } => Step::Classify {
                        input,
                        output,
                        classifier: model,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(steps = steps.len(), "compiled scoring session");
        Ok(Self { steps })
    }

    /// Loads a graph file and compiles it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ScoringGraph::load(path)?)
    }

    /// Scores one `(field, value)` pair and returns the predicted label.
    pub fn run(&self, field: &str, value: &str) -> Result<String> {
        let mut tensors: HashMap<&str, Tensor> = HashMap::new();
        tensors.insert(INPUT_FIELD, Tensor::Text(field.to_string()));
        tensors.insert(INPUT_VALUE, Tensor::Text(value.to_string()));

        for step in &self.steps {
            match step {
                Step::Normalize {
                    field,
                    value,
                    output,
                    normalizer,
                } => {
                    let out = normalizer.apply(text(&tensors, field)?, text(&tensors, value)?);
                    tensors.insert(output, Tensor::Text(out));
                }
                Step::Tfidf {
                    input,
                    output,
                    vectorizer,
                } => {
                    let out = vectorizer.transform(text(&tensors, input)?);
                    tensors.insert(output, Tensor::Features(out));
                }
                Step::Concat { inputs, output } => {
                    let parts = inputs
                        .iter()
                        .map(|name| features(&tensors, name))
                        .collect::<Result<Vec<_>>>()?;
                    let out = SparseVector::hstack(&parts);
                    tensors.insert(output, Tensor::Features(out));
                }
                Step::Classify {
                    input,
                    output,
                    classifier,
                } => {
                    let out = classifier.predict(features(&tensors, input)?)?.to_string();
                    tensors.insert(output, Tensor::Text(out));
                }
            }
        }

        match tensors.remove(OUTPUT_LABEL) {
            Some(Tensor::Text(label)) => Ok(label),
            _ => Err(malformed("graph did not produce a text `label`".into())),
        }
    }

    /// Scores many pairs; stops at the first failure.
    pub fn run_batch<F: AsRef<str>, V: AsRef<str>>(&self, pairs: &[(F, V)]) -> Result<Vec<String>> {
        pairs
            .iter()
            .map(|(f, v)| self.run(f.as_ref(), v.as_ref()))
            .collect()
    }
}

fn text<'a>(tensors: &'a HashMap<&str, Tensor>, name: &str) -> Result<&'a str> {
    match tensors.get(name) {
        Some(Tensor::Text(s)) => Ok(s),
        _ => Err(malformed(format!("`{name}` is not a text tensor"))),
    }
}

fn features<'a>(tensors: &'a HashMap<&str, Tensor>, name: &str) -> Result<&'a SparseVector> {
    match tensors.get(name) {
        Some(Tensor::Features(v)) => Ok(v),
        _ => Err(malformed(format!("`{name}` is not a feature tensor"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::toy_pipeline;
    use crate::types::TrackedField;

    #[test]
    fn session_matches_pipeline() {
        let pipeline = toy_pipeline();
        let session = ScoringSession::new(ScoringGraph::from_pipeline(&pipeline)).unwrap();

        for (field, value) in [
            (TrackedField::Email, ""),
            (TrackedField::Email, "someone@example.com"),
            (TrackedField::AppVersion, "ver42"),
            (TrackedField::AppVersion, "v2.1.3"),
        ] {
            let expected = pipeline.predict(field, value).unwrap();
            let got = session.run(field.as_str(), value).unwrap();
            assert_eq!(got, expected.as_str(), "{field} = {value:?}");
        }
    }

    #[test]
    fn hand_weighted_labels() {
        let session = ScoringSession::new(ScoringGraph::from_pipeline(&toy_pipeline())).unwrap();
        assert_eq!(session.run("email", "").unwrap(), "missing");
        assert_eq!(session.run("appVersion", "ver42").unwrap(), "invalid");
        assert_eq!(session.run("appVersion", "v2.1.3").unwrap(), "ok");
    }

    #[test]
    fn batch_scoring() {
        let session = ScoringSession::new(ScoringGraph::from_pipeline(&toy_pipeline())).unwrap();
        let labels = session
            .run_batch(&[("email", ""), ("appVersion", "ver42")])
            .unwrap();
        assert_eq!(labels, vec!["missing", "invalid"]);
    }

    #[test]
    fn invalid_graph_is_rejected() {
        let mut graph = ScoringGraph::from_pipeline(&toy_pipeline());
        graph.nodes.remove(1);
        assert!(ScoringSession::new(graph).is_err());
    }
}
