use paima::assessment::iat::reaction_times;
use paima::assessment::router::ScoreRequest;
use paima::assessment::{
    d_score, AssessmentService, IatBias, IatBlockLayout, IatSummary, IatTrialImporter,
};

fn imported_trials() -> Vec<paima::assessment::IatTrial> {
    let data = include_bytes!("fixtures/iat_trials.csv");
    IatTrialImporter::from_reader(&data[..]).expect("trial log imports")
}

#[test]
fn importer_reads_every_trial_in_the_log() {
    let trials = imported_trials();
    let layout = IatBlockLayout::standard();

    assert_eq!(trials.len(), layout.total_trials());
    assert_eq!(trials[0].block, 1);
    assert_eq!(trials[0].stimulus, "I");
    assert_eq!(trials.last().map(|trial| trial.block), Some(5));
    assert!(trials.iter().any(|trial| trial.is_error));
    assert!(trials
        .iter()
        .filter(|trial| trial.block < 3)
        .all(|trial| !trial.is_error));
}

#[test]
fn imported_log_produces_a_receptive_bias() {
    let trials = imported_trials();
    let layout = IatBlockLayout::standard();

    let summary = IatSummary::from_trials(&trials, &layout);
    assert_eq!(summary.bias, IatBias::Receptive);
    assert!(summary.difference_ms > 100.0);
    assert_eq!(summary.error_count, 4);

    let score = d_score(&reaction_times(&trials), &layout).expect("full log scores");
    assert!(score > 1.0, "d-score {score}");
}

#[test]
fn imported_log_drives_the_conflict_index() {
    let data = include_str!("fixtures/session_snapshot.json");
    let mut request: ScoreRequest = serde_json::from_str(data).expect("snapshot parses");
    let service = AssessmentService::default();

    let without_iat = service.assess(request.answers.clone(), None);
    request.answers.iat_reaction_times = reaction_times(&imported_trials());
    let with_iat = service.assess(request.answers, None);

    let d = with_iat.breakdown.d_score.expect("scored");
    assert!(without_iat.breakdown.d_score.is_none());
    assert!((with_iat.scores.psci - (d - with_iat.breakdown.gaze_adjustment)).abs() < 1e-12);
    assert!(with_iat.scores.psci > without_iat.scores.psci);
}

#[test]
fn missing_log_reports_an_io_error() {
    let err = IatTrialImporter::from_path("tests/fixtures/does_not_exist.csv")
        .expect_err("missing file");
    assert!(err.to_string().starts_with("failed to read IAT trial log"));
}
