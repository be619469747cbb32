//! Generate, train, export and score with the default settings.

use fieldcheck_core::{QualityTag, ScoringSession, TrackedField};
use fieldcheck_trainer::{
    flatten, load_reports, run_generation, run_training, train_test_split, GeneratorConfig,
    LabelCounts, TrainerConfig,
};

#[test]
fn default_corpus_trains_a_working_classifier() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("data/bug_reports_data.json");
    let model_path = dir.path().join("models/bug_report_classifier.graph.json");

    let generated = run_generation(&GeneratorConfig::new().with_output(&data_path)).unwrap();
    assert_eq!(generated.len(), 3000);

    let reports = load_reports(&data_path).unwrap();
    assert_eq!(LabelCounts::of(&reports), LabelCounts::default());
    let examples = flatten(&reports);
    assert_eq!(examples.len(), reports.len() * TrackedField::COUNT);

    let config = TrainerConfig::new()
        .with_data_path(&data_path)
        .with_model_path(&model_path);
    let outcome = run_training(&config).unwrap();
    assert_eq!(outcome.test_size, (examples.len() as f64 * 0.2).ceil() as usize);
    assert!(outcome.report.accuracy > 0.9, "{}", outcome.report);

    let pipeline = &outcome.pipeline;
    let cases = [
        (TrackedField::AppVersion, "ver42", QualityTag::Invalid),
        (TrackedField::Email, "", QualityTag::Missing),
        (TrackedField::StepsToReproduce, "can't explain", QualityTag::Vague),
        (TrackedField::AppVersion, "v2.1.3", QualityTag::Ok),
    ];
    for (field, value, expected) in cases {
        assert_eq!(pipeline.predict(field, value).unwrap(), expected, "{field} {value:?}");
    }

    let session = ScoringSession::load(&model_path).unwrap();
    for (field, value, expected) in cases {
        assert_eq!(session.run(field.as_str(), value).unwrap(), expected.as_str());
    }
    for report in reports.iter().take(50) {
        for field in TrackedField::ALL {
            let value = report.value(field);
            assert_eq!(
                session.run(field.as_str(), value).unwrap(),
                pipeline.predict(field, value).unwrap().as_str()
            );
        }
    }
}

#[test]
fn training_twice_gives_the_same_split_and_model() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("reports.json");
    let counts = LabelCounts {
        complete: 40,
        vague: 30,
        incomplete: 20,
        invalid: 10,
    };
    run_generation(
        &GeneratorConfig::new()
            .with_counts(counts)
            .with_output(&data_path),
    )
    .unwrap();

    let examples = flatten(&load_reports(&data_path).unwrap());
    assert_eq!(
        train_test_split(&examples, 0.2, 42),
        train_test_split(&examples, 0.2, 42)
    );

    let config = TrainerConfig::new()
        .with_data_path(&data_path)
        .with_model_path(dir.path().join("graph.json"))
        .with_epochs(5);
    let a = run_training(&config).unwrap();
    let b = run_training(&config).unwrap();
    assert_eq!(a.pipeline.classifier(), b.pipeline.classifier());
    assert_eq!(a.report, b.report);
}
