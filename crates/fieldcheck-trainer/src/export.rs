//! Scoring graph export.

use std::path::Path;

use anyhow::{Context, bail};
use fieldcheck_core::{FieldPipeline, ScoringGraph, ScoringSession, TrackedField};
use tracing::info;

/// Values checked against the reloaded graph after export.
const PROBES: &[(TrackedField, &str)] = &[
    (TrackedField::FullName, "Jane Doe"),
    (TrackedField::Email, ""),
    (TrackedField::AppVersion, "v2.1.3"),
    (TrackedField::AppVersion, "ver42"),
    (TrackedField::StepsToReproduce, "can't explain"),
];

/// Writes the pipeline as a scoring graph to `path`, replacing any
/// previous export, then reloads it and checks it scores like the
/// in-memory pipeline.
pub fn export_pipeline<P: AsRef<Path>>(pipeline: &FieldPipeline, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let graph = ScoringGraph::from_pipeline(pipeline);
    graph
        .save(path)
        .with_context(|| format!("failed to export scoring graph to {}", path.display()))?;

    let session = ScoringSession::load(path)
        .with_context(|| format!("exported graph at {} does not load", path.display()))?;
    for &(field, value) in PROBES {
        let expected = pipeline.predict(field, value)?;
        let actual = session.run(field.as_str(), value)?;
        if actual != expected.as_str() {
            bail!(
                "exported graph disagrees with pipeline on ({}, {:?}): {} vs {}",
                field,
                value,
                actual,
                expected
            );
        }
    }

    info!(
        path = %path.display(),
        nodes = graph.nodes.len(),
        "exported scoring graph"
    );
    Ok(())
}
