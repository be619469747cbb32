//! Writes a synthetic labeled bug report corpus.

use std::path::PathBuf;

use clap::Parser;
use fieldcheck_trainer::{run_generation, GeneratorConfig, LabelCounts, DEFAULT_DATA_PATH};

/// CLI arguments
#[derive(Parser)]
#[command(name = "generate")]
#[command(about = "Generate synthetic labeled bug reports")]
#[command(version)]
struct Cli {
    /// Output JSON file (overwritten)
    #[arg(short, long, env = "FIELDCHECK_DATA", default_value = DEFAULT_DATA_PATH)]
    output: PathBuf,

    /// Random seed
    #[arg(short, long, env = "FIELDCHECK_SEED", default_value_t = 1234)]
    seed: u64,

    /// Reports labeled `complete`
    #[arg(long, default_value_t = 1200)]
    complete: usize,

    /// Reports labeled `vague`
    #[arg(long, default_value_t = 900)]
    vague: usize,

    /// Reports labeled `incomplete`
    #[arg(long, default_value_t = 600)]
    incomplete: usize,

    /// Reports labeled `invalid`
    #[arg(long, default_value_t = 300)]
    invalid: usize,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = GeneratorConfig::new()
        .with_output(cli.output)
        .with_seed(cli.seed)
        .with_counts(LabelCounts {
            complete: cli.complete,
            vague: cli.vague,
            incomplete: cli.incomplete,
            invalid: cli.invalid,
        });

    match run_generation(&config) {
        Ok(reports) => println!(
            "Generated {} bug reports to {}",
            reports.len(),
            config.output.display()
        ),
        Err(e) => {
            eprintln!("Generation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
