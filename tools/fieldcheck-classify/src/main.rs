use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fieldcheck_core::{ScoringSession, TrackedField};
use serde::{Deserialize, Serialize};
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "fieldcheck-classify")]
#[command(about = "Classify bug report field values read from stdin")]
#[command(version)]
struct Cli {
    /// Exported scoring graph
    #[arg(
        short,
        long,
        env = "FIELDCHECK_MODEL",
        default_value = "models/bug_report_classifier.graph.json"
    )]
    model: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ClassifyInput {
    field: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    field: String,
    value: String,
    label: Option<String>,
    error: Option<String>,
}

/// Accepts `{"field": .., "value": ..}` or `field<TAB>value`.
fn parse_line(line: &str) -> Result<ClassifyInput, String> {
    if line.trim_start().starts_with('{') {
        return serde_json::from_str(line).map_err(|e| format!("bad JSON input: {}", e));
    }
    match line.split_once('\t') {
        Some((field, value)) => Ok(ClassifyInput {
            field: field.to_string(),
            value: value.to_string(),
        }),
        None => Ok(ClassifyInput {
            field: line.to_string(),
            value: String::new(),
        }),
    }
}

fn classify(session: &ScoringSession, line: &str) -> ClassifyOutput {
    let input = match parse_line(line) {
        Ok(input) => input,
        Err(error) => {
            return ClassifyOutput {
                field: String::new(),
                value: line.to_string(),
                label: None,
                error: Some(error),
            };
        }
    };

    let result = input
        .field
        .parse::<TrackedField>()
        .and_then(|field| session.run(field.as_str(), &input.value));

    match result {
        Ok(label) => ClassifyOutput {
            field: input.field,
            value: input.value,
            label: Some(label),
            error: None,
        },
        Err(e) => ClassifyOutput {
            field: input.field,
            value: input.value,
            label: None,
            error: Some(e.to_string()),
        },
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let session = ScoringSession::load(&cli.model)
        .with_context(|| format!("failed to load scoring graph {}", cli.model.display()))?;
    info!(model = %cli.model.display(), "loaded scoring graph");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let output = classify(&session, &line);
        serde_json::to_writer(&mut out, &output)?;
        writeln!(out)?;
    }
    Ok(())
}
