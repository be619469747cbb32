//! # Trainer
//!
//! Fits the field pipeline on a seeded train split and evaluates it on the
//! held-out rest.

use std::path::PathBuf;

use anyhow::Context;
use fieldcheck_core::{
    AnalyzerConfig, FieldPipeline, SparseVector, TfidfConfig, TfidfVectorizer, ValueNormalizer,
};
use tracing::info;

use crate::data::{ensure_trainable, flatten, load_reports, train_test_split, TrainingExample};
use crate::export::export_pipeline;
use crate::logreg::{train_logreg, TrainDataset, TrainOptions};
use crate::metrics::ClassificationReport;
use crate::synth::DEFAULT_DATA_PATH;

/// Default location of the exported scoring graph.
pub const DEFAULT_MODEL_PATH: &str = "models/bug_report_classifier.graph.json";

/// Configuration for a training run.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Bug report corpus to train on.
    pub data_path: PathBuf,
    /// Where the scoring graph is exported.
    pub model_path: PathBuf,
    /// Fraction of examples held out for evaluation.
    pub test_ratio: f64,
    /// Seed for the split and the batch order.
    pub seed: u64,
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub balance_classes: bool,
    /// Vocabulary cap for the value vectorizer.
    pub value_max_features: Option<usize>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            test_ratio: 0.2,
            seed: 42,
            epochs: 30,
            learning_rate: 0.5,
            l2: 1e-4,
            batch_size: 64,
            balance_classes: true,
            value_max_features: Some(10_000),
        }
    }
}

impl TrainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, lr: f32) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_l2(mut self, l2: f32) -> Self {
        self.l2 = l2;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_balance_classes(mut self, balance: bool) -> Self {
        self.balance_classes = balance;
        self
    }

    pub fn with_value_max_features(mut self, max_features: Option<usize>) -> Self {
        self.value_max_features = max_features;
        self
    }

    /// Analyzer settings for field names: word unigrams.
    pub fn field_tfidf(&self) -> TfidfConfig {
        TfidfConfig::new(AnalyzerConfig::words())
    }

    /// Analyzer settings for values: word 1-2 grams plus char_wb 2-4 grams.
    pub fn value_tfidf(&self) -> TfidfConfig {
        let config = TfidfConfig::new(
            AnalyzerConfig::words()
                .with_word_ngrams(1, 2)
                .with_char_ngrams(2, 4),
        );
        match self.value_max_features {
            Some(n) => config.with_max_features(n),
            None => config,
        }
    }

    fn train_options(&self) -> TrainOptions {
        TrainOptions {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            l2: self.l2,
            batch_size: self.batch_size,
            seed: self.seed,
            balance_classes: self.balance_classes,
        }
    }
}

/// A fitted pipeline with its held-out evaluation.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub pipeline: FieldPipeline,
    pub report: ClassificationReport,
    pub train_size: usize,
    pub test_size: usize,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Splits, fits on the train side and evaluates on the test side.
    pub fn fit(&self, examples: &[TrainingExample]) -> anyhow::Result<FitOutcome> {
        let tags = ensure_trainable(examples)?;
        let classes: Vec<String> = tags.iter().map(|t| t.as_str().to_string()).collect();

        let (train, test) = train_test_split(examples, self.config.test_ratio, self.config.seed);
        if train.is_empty() {
            anyhow::bail!(
                "test ratio {} leaves no training examples",
                self.config.test_ratio
            );
        }
        info!(
            train = train.len(),
            test = test.len(),
            classes = classes.len(),
            "split examples"
        );

        let field_names: Vec<&str> = train.iter().map(|e| e.field.as_str()).collect();
        let values: Vec<&str> = train.iter().map(|e| e.value.as_str()).collect();
        let field_vectorizer = TfidfVectorizer::fit(self.config.field_tfidf(), &field_names)
            .context("failed to fit field vectorizer")?;
        let value_vectorizer = TfidfVectorizer::fit(self.config.value_tfidf(), &values)
            .context("failed to fit value vectorizer")?;
        info!(
            field_terms = field_vectorizer.dim(),
            value_terms = value_vectorizer.dim(),
            "fitted vectorizers"
        );

        let featurize = |e: &TrainingExample| -> SparseVector {
            let field_row = field_vectorizer.transform(e.field.as_str());
            let value_row = value_vectorizer.transform(&e.value);
            SparseVector::hstack(&[&field_row, &value_row])
        };
        let class_index = |e: &TrainingExample| -> anyhow::Result<usize> {
            tags.iter()
                .position(|t| *t == e.label)
                .with_context(|| format!("label {} missing from class list", e.label))
        };

        let dataset = TrainDataset {
            classes: classes.clone(),
            dim: field_vectorizer.dim() + value_vectorizer.dim(),
            x: train.iter().map(featurize).collect(),
            y: train.iter().map(class_index).collect::<anyhow::Result<_>>()?,
        };
        let classifier = train_logreg(&dataset, &self.config.train_options())?;

        let pipeline = FieldPipeline::new(
            ValueNormalizer::default(),
            field_vectorizer,
            value_vectorizer,
            classifier,
        )?;

        let mut y_true = Vec::with_capacity(test.len());
        let mut y_pred = Vec::with_capacity(test.len());
        for example in &test {
            let x = pipeline.featurize_normalized(example.field.as_str(), &example.value);
            y_true.push(class_index(example)?);
            y_pred.push(pipeline.classifier().predict_index(&x)?);
        }
        let report = ClassificationReport::compute(&classes, &y_true, &y_pred)?;
        info!(accuracy = report.accuracy, "evaluated on held-out split");

        Ok(FitOutcome {
            pipeline,
            report,
            train_size: train.len(),
            test_size: test.len(),
        })
    }
}

/// Loads the corpus, fits the pipeline and exports the scoring graph.
pub fn run_training(config: &TrainerConfig) -> anyhow::Result<FitOutcome> {
    let reports = load_reports(&config.data_path)?;
    let examples = flatten(&reports);
    info!(
        reports = reports.len(),
        examples = examples.len(),
        path = %config.data_path.display(),
        "loaded training data"
    );

    let outcome = Trainer::new(config.clone()).fit(&examples)?;
    export_pipeline(&outcome.pipeline, &config.model_path)?;
    Ok(outcome)
}
