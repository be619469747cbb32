//! # Fieldcheck Trainer
//!
//! Offline stages that produce a field classifier: the synthetic bug report
//! generator, dataset flattening and splitting, logistic regression fitting,
//! held-out evaluation and scoring graph export.
//!
//! ```no_run
//! use fieldcheck_trainer::{run_training, TrainerConfig};
//!
//! let outcome = run_training(&TrainerConfig::default()).unwrap();
//! println!("{}", outcome.report);
//! ```

pub mod data;
pub mod export;
pub mod logreg;
pub mod metrics;
pub mod rng;
pub mod synth;
pub mod trainer;

pub use data::{flatten, load_reports, train_test_split, TrainingExample};
pub use export::export_pipeline;
pub use logreg::{train_logreg, TrainDataset, TrainOptions};
pub use metrics::{ClassScores, ClassificationReport};
pub use synth::{
    generate_reports, run_generation, write_reports, GeneratorConfig, LabelCounts,
    ReportGenerator, DEFAULT_DATA_PATH,
};
pub use trainer::{run_training, FitOutcome, Trainer, TrainerConfig, DEFAULT_MODEL_PATH};
