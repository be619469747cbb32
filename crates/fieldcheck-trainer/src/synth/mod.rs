//! # Synthetic Bug Report Generator
//!
//! Builds a labeled corpus of bug reports. Each report gets a coarse label,
//! a per-field tag plan derived from that label, and field values drawn to
//! match the plan exactly.

pub mod pools;
pub mod values;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fieldcheck_core::{BugReport, CoarseLabel, FieldTags, QualityTag, TrackedField};
use tracing::info;

use crate::rng::SeededRng;
use values::{degraded_tag, value_for};

/// Default location of the generated corpus.
pub const DEFAULT_DATA_PATH: &str = "data/bug_reports_data.json";

/// How many reports to generate per coarse label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelCounts {
    pub complete: usize,
    pub vague: usize,
    pub incomplete: usize,
    pub invalid: usize,
}

impl Default for LabelCounts {
    fn default() -> Self {
        Self {
            complete: 1200,
            vague: 900,
            incomplete: 600,
            invalid: 300,
        }
    }
}

impl LabelCounts {
    pub fn get(&self, label: CoarseLabel) -> usize {
        match label {
            CoarseLabel::Complete => self.complete,
            CoarseLabel::Vague => self.vague,
            CoarseLabel::Incomplete => self.incomplete,
            CoarseLabel::Invalid => self.invalid,
        }
    }

    pub fn total(&self) -> usize {
        CoarseLabel::ALL.iter().map(|l| self.get(*l)).sum()
    }

    /// Counts observed in a set of reports.
    pub fn of(reports: &[BugReport]) -> Self {
        let mut counts = Self {
            complete: 0,
            vague: 0,
            incomplete: 0,
            invalid: 0,
        };
        for report in reports {
            match report.label {
                CoarseLabel::Complete => counts.complete += 1,
                CoarseLabel::Vague => counts.vague += 1,
                CoarseLabel::Incomplete => counts.incomplete += 1,
                CoarseLabel::Invalid => counts.invalid += 1,
            }
        }
        counts
    }
}

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub counts: LabelCounts,
    pub seed: u64,
    /// Where the corpus is written.
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            counts: LabelCounts::default(),
            seed: 1234,
            output: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(mut self, counts: LabelCounts) -> Self {
        self.counts = counts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }
}

/// Draws labeled reports from a seeded random stream.
pub struct ReportGenerator {
    rng: SeededRng,
}

impl ReportGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
        }
    }

    /// Generates one report for `label`. The report always carries
    /// per-field tags.
    pub fn generate(&mut self, label: CoarseLabel) -> BugReport {
        let plan = self.plan(label);

        let mut report = BugReport {
            full_name: String::new(),
            email: String::new(),
            feedback_type: String::new(),
            app_version: String::new(),
            steps_to_reproduce: String::new(),
            expected_behavior: String::new(),
            actual_behavior: String::new(),
            screenshot_provided: self.rng.chance(0.5),
            label,
            errors: None,
        };

        let mut errors = FieldTags::new();
        for field in TrackedField::ALL {
            let tag = plan[field.index()];
            *report.value_mut(field) = value_for(&mut self.rng, field, tag);
            errors.insert(field, tag);
        }
        report.errors = Some(errors);
        report
    }

    /// Generates exactly `counts` reports, grouped by label in
    /// [`CoarseLabel::ALL`] order.
    pub fn corpus(&mut self, counts: &LabelCounts) -> Vec<BugReport> {
        let mut reports = Vec::with_capacity(counts.total());
        for label in CoarseLabel::ALL {
            for _ in 0..counts.get(label) {
                reports.push(self.generate(label));
            }
        }
        reports
    }

    /// Like [`ReportGenerator::corpus`], then shuffled.
    pub fn shuffled_corpus(&mut self, counts: &LabelCounts) -> Vec<BugReport> {
        let mut reports = self.corpus(counts);
        self.rng.shuffle(&mut reports);
        reports
    }

    /// Per-field tags for a report with the given coarse label.
    fn plan(&mut self, label: CoarseLabel) -> [QualityTag; TrackedField::COUNT] {
        let mut plan = [QualityTag::Ok; TrackedField::COUNT];
        match label {
            CoarseLabel::Complete => {}
            CoarseLabel::Vague => {
                for field in TrackedField::ALL.into_iter().filter(|f| f.is_free_text()) {
                    plan[field.index()] = if self.rng.chance(0.8) {
                        QualityTag::Vague
                    } else {
                        QualityTag::Missing
                    };
                }
            }
            CoarseLabel::Incomplete => {
                for field in TrackedField::ALL {
                    let roll = self.rng.unit();
                    plan[field.index()] = if roll < 0.3 {
                        QualityTag::Missing
                    } else if roll < 0.5 {
                        degraded_tag(field)
                    } else {
                        QualityTag::Ok
                    };
                }
                if plan.iter().all(|t| *t == QualityTag::Ok) {
                    plan[self.rng.below(TrackedField::COUNT)] = QualityTag::Missing;
                }
            }
            CoarseLabel::Invalid => {
                for field in TrackedField::ALL {
                    if field != TrackedField::FeedbackType {
                        plan[field.index()] = QualityTag::Invalid;
                    }
                }
            }
        }
        plan
    }
}

/// Generates the shuffled corpus described by `config`.
pub fn generate_reports(config: &GeneratorConfig) -> Vec<BugReport> {
    ReportGenerator::new(config.seed).shuffled_corpus(&config.counts)
}

/// Writes reports as a pretty-printed JSON array, replacing `path`.
pub fn write_reports<P: AsRef<Path>>(path: P, reports: &[BugReport]) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(reports)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Generates the corpus and writes it to `config.output`.
pub fn run_generation(config: &GeneratorConfig) -> anyhow::Result<Vec<BugReport>> {
    let reports = generate_reports(config);
    write_reports(&config.output, &reports)?;
    info!(
        reports = reports.len(),
        path = %config.output.display(),
        seed = config.seed,
        "wrote synthetic bug reports"
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> LabelCounts {
        LabelCounts {
            complete: 40,
            vague: 30,
            incomplete: 20,
            invalid: 10,
        }
    }

    #[test]
    fn corpus_matches_requested_counts() {
        let reports = ReportGenerator::new(1).corpus(&small());
        assert_eq!(reports.len(), 100);
        assert_eq!(LabelCounts::of(&reports), small());
        // grouped before shuffling
        assert!(reports[..40].iter().all(|r| r.label == CoarseLabel::Complete));
        assert!(reports[90..].iter().all(|r| r.label == CoarseLabel::Invalid));
    }

    #[test]
    fn shuffling_keeps_counts() {
        let reports = ReportGenerator::new(2).shuffled_corpus(&small());
        assert_eq!(LabelCounts::of(&reports), small());
    }

    #[test]
    fn complete_reports_are_all_ok() {
        let reports = ReportGenerator::new(3).corpus(&small());
        for report in reports.iter().filter(|r| r.label == CoarseLabel::Complete) {
            let errors = report.errors.as_ref().unwrap();
            assert!(errors.values().all(|t| *t == QualityTag::Ok));
        }
    }

    #[test]
    fn empty_values_are_tagged_missing() {
        let reports = ReportGenerator::new(4).corpus(&small());
        for report in &reports {
            let errors = report.errors.as_ref().unwrap();
            for field in TrackedField::ALL {
                let empty = report.value(field).is_empty();
                assert_eq!(empty, errors[&field] == QualityTag::Missing, "{field}");
            }
        }
    }

    #[test]
    fn every_field_is_tagged() {
        let mut generator = ReportGenerator::new(5);
        for label in CoarseLabel::ALL {
            let report = generator.generate(label);
            assert_eq!(report.errors.as_ref().unwrap().len(), TrackedField::COUNT);
        }
    }

    #[test]
    fn incomplete_reports_have_a_problem() {
        let mut generator = ReportGenerator::new(6);
        for _ in 0..200 {
            let report = generator.generate(CoarseLabel::Incomplete);
            assert!(report.errors.unwrap().values().any(|t| t.is_problem()));
        }
    }

    #[test]
    fn vague_reports_only_touch_free_text() {
        let mut generator = ReportGenerator::new(7);
        for _ in 0..100 {
            let report = generator.generate(CoarseLabel::Vague);
            for (field, tag) in report.errors.unwrap() {
                if field.is_free_text() {
                    assert!(matches!(tag, QualityTag::Vague | QualityTag::Missing));
                } else {
                    assert_eq!(tag, QualityTag::Ok);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_corpus() {
        let config = GeneratorConfig::new().with_counts(small()).with_seed(99);
        assert_eq!(generate_reports(&config), generate_reports(&config));
    }

    #[test]
    fn write_creates_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/data.json");
        let reports = ReportGenerator::new(8).corpus(&small());
        write_reports(&path, &reports).unwrap();
        write_reports(&path, &reports[..5]).unwrap();
        let back: Vec<BugReport> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, reports[..5]);
    }
}
