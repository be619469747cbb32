//! Trains the field classifier and exports its scoring graph.

use std::path::PathBuf;

use clap::Parser;
use fieldcheck_trainer::{
    run_training, TrainerConfig, DEFAULT_DATA_PATH, DEFAULT_MODEL_PATH,
};

/// CLI arguments
#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Train the bug report field classifier and export it")]
#[command(version)]
struct Cli {
    /// Bug report corpus
    #[arg(short, long, env = "FIELDCHECK_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Scoring graph output (overwritten)
    #[arg(short, long, env = "FIELDCHECK_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Fraction of examples held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,

    /// Seed for the split and batch order
    #[arg(short, long, env = "FIELDCHECK_SEED", default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 30)]
    epochs: usize,

    #[arg(long, default_value_t = 0.5)]
    learning_rate: f32,

    /// L2 penalty
    #[arg(long, default_value_t = 1e-4)]
    l2: f32,

    #[arg(long, default_value_t = 64)]
    batch_size: usize,

    /// Disable class-balanced sample weights
    #[arg(long)]
    no_balance: bool,

    /// Vocabulary cap for field values
    #[arg(long, default_value_t = 10_000)]
    max_features: usize,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = TrainerConfig::new()
        .with_data_path(cli.data)
        .with_model_path(cli.model)
        .with_test_ratio(cli.test_ratio)
        .with_seed(cli.seed)
        .with_epochs(cli.epochs)
        .with_learning_rate(cli.learning_rate)
        .with_l2(cli.l2)
        .with_batch_size(cli.batch_size)
        .with_balance_classes(!cli.no_balance)
        .with_value_max_features(Some(cli.max_features));

    match run_training(&config) {
        Ok(outcome) => {
            println!(
                "Trained on {} examples, evaluated on {}",
                outcome.train_size, outcome.test_size
            );
            println!("{}", outcome.report);
            println!("Exported scoring graph to {}", config.model_path.display());
        }
        Err(e) => {
            eprintln!("Training failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
