//! # Fieldcheck Core
//!
//! Scores the fields of a submitted bug report as `ok`, `missing`, `vague`
//! or `invalid`. Provides the report data model, TF-IDF text features, the
//! linear classifier, and the portable scoring graph a trained pipeline is
//! exported to.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fieldcheck_core::ScoringSession;
//!
//! let session = ScoringSession::load("models/bug_report_classifier.graph.json").unwrap();
//! let label = session.run("appVersion", "ver42").unwrap();
//! println!("appVersion: {label}");
//! ```
pub mod classifier;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod text;
pub mod types;

// Re-export primary API
pub use classifier::LinearClassifier;
pub use error::{FieldcheckError, Result};
pub use graph::{ScoringGraph, ScoringSession};
pub use pipeline::FieldPipeline;
pub use text::{
    Analyzer, AnalyzerConfig, SparseVector, TfidfConfig, TfidfModel, TfidfVectorizer,
    ValueNormalizer,
};
pub use types::{BugReport, CoarseLabel, FieldTags, Labeling, QualityTag, TrackedField};
