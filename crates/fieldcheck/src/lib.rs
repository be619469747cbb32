//! # Fieldcheck
//!
//! Flags bug report fields that are missing, vague or invalid.
//!
//! [`fieldcheck_core`] holds the data model, the fitted pipeline and the
//! scoring graph runtime; [`fieldcheck_trainer`] generates synthetic reports
//! and fits the pipeline.

pub use fieldcheck_core;
pub use fieldcheck_trainer;

pub use fieldcheck_core::{
    BugReport, CoarseLabel, FieldPipeline, FieldcheckError, QualityTag, ScoringGraph,
    ScoringSession, TrackedField,
};
pub use fieldcheck_trainer::{run_generation, run_training, GeneratorConfig, TrainerConfig};
