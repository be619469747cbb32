//! # Scoring Graph
//!
//! The portable, framework-independent form of a trained pipeline. A graph
//! declares two string inputs (`field`, `value`), one string output
//! (`label`) and an ordered list of nodes. Each node reads named tensors
//! produced earlier and writes exactly one new tensor.
//!
//! Graphs are stored as JSON. Any runtime that implements the four node
//! operations can score with one; [`ScoringSession`] is the reference
//! runtime.

mod session;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::LinearClassifier;
use crate::error::{FieldcheckError, Result};
use crate::pipeline::FieldPipeline;
use crate::text::{TfidfModel, ValueNormalizer};

pub use session::ScoringSession;

/// Identifies fieldcheck graph files.
pub const GRAPH_FORMAT: &str = "fieldcheck-scoring-graph";

/// Current graph schema version.
pub const GRAPH_VERSION: u32 = 1;

pub const INPUT_FIELD: &str = "field";
pub const INPUT_VALUE: &str = "value";
pub const OUTPUT_LABEL: &str = "label";

/// Element type of a declared tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    String,
}

/// A declared graph input or output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorSpec {
    pub name: String,
    pub dtype: DType,
    pub shape: Vec<usize>,
}

impl TensorSpec {
    /// A single string.
    pub fn scalar_string(name: &str) -> Self {
        Self {
            name: name.to_string(),
            dtype: DType::String,
            shape: vec![1],
        }
    }
}

/// One operation in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Node {
    /// Text, text -> text: applies value normalization given the field name.
    NormalizeValue {
        name: String,
        field: String,
        value: String,
        output: String,
        normalizer: ValueNormalizer,
    },
    /// Text -> features.
    TfidfVectorizer {
        name: String,
        input: String,
        output: String,
        model: TfidfModel,
    },
    /// Features... -> features, columns laid side by side in input order.
    Concat {
        name: String,
        inputs: Vec<String>,
        output: String,
    },
    /// Features -> text: name of the best scoring class.
    LinearClassifier {
        name: String,
        input: String,
        output: String,
        model: LinearClassifier,
    },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Self::NormalizeValue { name, .. }
            | Self::TfidfVectorizer { name, .. }
            | Self::Concat { name, .. }
            | Self::LinearClassifier { name, .. } => name,
        }
    }

    /// Names of the tensors this node reads.
    pub fn inputs(&self) -> Vec<&str> {
        match self {
            Self::NormalizeValue { field, value, .. } => vec![field.as_str(), value.as_str()],
            Self::TfidfVectorizer { input, .. } | Self::LinearClassifier { input, .. } => {
                vec![input.as_str()]
            }
            Self::Concat { inputs, .. } => inputs.iter().map(String::as_str).collect(),
        }
    }

    /// Name of the tensor this node writes.
    pub fn output(&self) -> &str {
        match self {
            Self::NormalizeValue { output, .. }
            | Self::TfidfVectorizer { output, .. }
            | Self::Concat { output, .. }
            | Self::LinearClassifier { output, .. } => output,
        }
    }
}

/// Kind of value flowing along a graph edge, with feature width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeKind {
    Text,
    Features(usize),
}

/// A serialized scoring graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringGraph {
    pub format: String,
    pub version: u32,
    pub producer: String,
    pub inputs: Vec<TensorSpec>,
    pub outputs: Vec<TensorSpec>,
    pub nodes: Vec<Node>,
}

impl ScoringGraph {
    /// Converts a fitted pipeline into its graph form.
    pub fn from_pipeline(pipeline: &FieldPipeline) -> Self {
        let nodes = vec![
            Node::NormalizeValue {
                name: "normalize_value".into(),
                field: INPUT_FIELD.into(),
                value: INPUT_VALUE.into(),
                output: "value_normalized".into(),
                normalizer: pipeline.normalizer().clone(),
            },
            Node::TfidfVectorizer {
                name: "field_tfidf".into(),
                input: INPUT_FIELD.into(),
                output: "field_features".into(),
                model: pipeline.field_vectorizer().model().clone(),
            },
            Node::TfidfVectorizer {
                name: "value_tfidf".into(),
                input: "value_normalized".into(),
                output: "value_features".into(),
                model: pipeline.value_vectorizer().model().clone(),
            },
            Node::Concat {
                name: "features".into(),
                inputs: vec!["field_features".into(), "value_features".into()],
                output: "features".into(),
            },
            Node::LinearClassifier {
                name: "classifier".into(),
                input: "features".into(),
                output: OUTPUT_LABEL.into(),
                model: pipeline.classifier().clone(),
            },
        ];

        Self {
            format: GRAPH_FORMAT.into(),
            version: GRAPH_VERSION,
            producer: concat!("fieldcheck-core ", env!("CARGO_PKG_VERSION")).into(),
            inputs: vec![
                TensorSpec::scalar_string(INPUT_FIELD),
                TensorSpec::scalar_string(INPUT_VALUE),
            ],
            outputs: vec![TensorSpec::scalar_string(OUTPUT_LABEL)],
            nodes,
        }
    }

    /// Checks the header, declared I/O and node wiring.
    ///
    /// Every node input must be a graph input or an earlier node's output,
    /// of the kind the node expects; no tensor is written twice; `label`
    /// must be produced as text.
    pub fn validate(&self) -> Result<()> {
        self.check_header()?;
        self.edge_kinds().map(|_| ())
    }

    fn check_header(&self) -> Result<()> {
        if self.format != GRAPH_FORMAT {
            return Err(malformed(format!("unexpected format {:?}", self.format)));
        }
        if self.version != GRAPH_VERSION {
            return Err(malformed(format!(
                "unsupported version {} (expected {GRAPH_VERSION})",
                self.version
            )));
        }
        let inputs = [
            TensorSpec::scalar_string(INPUT_FIELD),
            TensorSpec::scalar_string(INPUT_VALUE),
        ];
        if self.inputs != inputs {
            return Err(malformed(
                "inputs must be exactly `field` and `value`, each a single string".into(),
            ));
        }
        if self.outputs != [TensorSpec::scalar_string(OUTPUT_LABEL)] {
            return Err(malformed(
                "outputs must be exactly `label`, a single string".into(),
            ));
        }
        Ok(())
    }

    /// Walks the nodes in order and returns the kind of every tensor.
    pub(crate) fn edge_kinds(&self) -> Result<HashMap<String, EdgeKind>> {
        let mut kinds: HashMap<String, EdgeKind> = self
            .inputs
            .iter()
            .map(|spec| (spec.name.clone(), EdgeKind::Text))
            .collect();

        for node in &self.nodes {
            let mut input_kinds = Vec::new();
            for input in node.inputs() {
                let kind = kinds.get(input).copied().ok_or_else(|| {
                    malformed(format!(
                        "node `{}` reads `{input}` before it is defined",
                        node.name()
                    ))
                })?;
                input_kinds.push(kind);
            }

            let out_kind = match node {
                Node::NormalizeValue { .. } => {
                    expect_text(node, &input_kinds)?;
                    EdgeKind::Text
                }
                Node::TfidfVectorizer { model, .. } => {
                    expect_text(node, &input_kinds)?;
                    model.validate()?;
                    EdgeKind::Features(model.idf.len())
                }
                Node::Concat { .. } => {
                    if input_kinds.is_empty() {
                        return Err(malformed(format!("node `{}` has no inputs", node.name())));
                    }
                    let mut width = 0;
                    for kind in &input_kinds {
                        match kind {
                            EdgeKind::Features(w) => width += w,
                            EdgeKind::Text => {
                                return Err(malformed(format!(
                                    "node `{}` expects feature inputs",
                                    node.name()
                                )));
                            }
                        }
                    }
                    EdgeKind::Features(width)
                }
                Node::LinearClassifier { model, .. } => {
                    model.validate()?;
                    match input_kinds.as_slice() {
                        [EdgeKind::Features(w)] if *w == model.dim => EdgeKind::Text,
                        [EdgeKind::Features(w)] => {
                            return Err(FieldcheckError::DimensionMismatch {
                                expected: model.dim,
                                actual: *w,
                            });
                        }
                        _ => {
                            return Err(malformed(format!(
                                "node `{}` expects one feature input",
                                node.name()
                            )));
                        }
                    }
                }
            };

            if kinds.insert(node.output().to_string(), out_kind).is_some() {
                return Err(malformed(format!(
                    "tensor `{}` is written more than once",
                    node.output()
                )));
            }
        }

        match kinds.get(OUTPUT_LABEL) {
            Some(EdgeKind::Text) => Ok(kinds),
            Some(EdgeKind::Features(_)) => Err(malformed("`label` must be text".into())),
            None => Err(malformed("no node produces `label`".into())),
        }
    }

    /// Writes the graph as JSON, creating parent directories and replacing
    /// any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        info!(path = %path.display(), nodes = self.nodes.len(), "saved scoring graph");
        Ok(())
    }

    /// Reads and validates a graph file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let graph: Self = serde_json::from_reader(reader)?;
        graph.validate()?;
        Ok(graph)
    }
}

fn expect_text(node: &Node, kinds: &[EdgeKind]) -> Result<()> {
    if kinds.iter().all(|k| *k == EdgeKind::Text) {
        Ok(())
    } else {
        Err(malformed(format!("node `{}` expects text inputs", node.name())))
    }
}

fn malformed(msg: String) -> FieldcheckError {
    FieldcheckError::MalformedGraph(msg)
}
