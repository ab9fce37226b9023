use crate::infra::{assessment_service, classifier_config};
use clap::Args;
use paima::assessment::iat::reaction_times;
use paima::assessment::router::ScoreRequest;
use paima::assessment::{
    AssessmentReport, AssessmentResult, AssessmentService, IatSummary, IatTrial, IatTrialImporter,
};
use paima::error::AppError;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON answer snapshot (implicitAnswers, explicitAnswers, wellbeingAnswers, ...)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Optional IAT trial log; replaces any reaction times in the snapshot
    #[arg(long)]
    pub(crate) iat_csv: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreOutput {
    result: AssessmentResult,
    report: AssessmentReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    iat_summary: Option<IatSummary>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        iat_csv,
        pretty,
    } = args;

    let raw = std::fs::read_to_string(&input)?;
    let request: ScoreRequest = serde_json::from_str(&raw)?;

    let trials = iat_csv.map(IatTrialImporter::from_path).transpose()?;

    let service = assessment_service(&classifier_config()?);
    let output = score_request(&service, request, trials)?;

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}

fn score_request(
    service: &AssessmentService,
    mut request: ScoreRequest,
    trials: Option<Vec<IatTrial>>,
) -> Result<ScoreOutput, AppError> {
    let layout = service.aggregator().layout();
    let iat_summary = match trials {
        Some(trials) => {
            IatTrialImporter::check_layout(&trials, layout)?;
            request.answers.iat_reaction_times = reaction_times(&trials);
            Some(IatSummary::from_trials(&trials, layout))
        }
        None => None,
    };

    let result = service.assess(request.answers, request.explicit_goal);
    let report = AssessmentReport::build(&result);
    Ok(ScoreOutput {
        result,
        report,
        iat_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use paima::assessment::{IatBias, IatBlockKind};

    fn trials(compatible_ms: f64, incompatible_ms: f64) -> Vec<IatTrial> {
        let layout = paima::assessment::IatBlockLayout::standard();
        let mut trials = Vec::new();
        for (position, block) in layout.blocks().iter().enumerate() {
            for trial in 0..block.trials {
                let rt_ms = match block.kind {
                    IatBlockKind::Compatible => compatible_ms + trial as f64,
                    IatBlockKind::Incompatible => incompatible_ms + trial as f64,
                    _ => 700.0,
                };
                trials.push(IatTrial {
                    block: position + 1,
                    trial,
                    stimulus: "me".to_string(),
                    category: "self".to_string(),
                    rt_ms,
                    is_error: false,
                });
            }
        }
        trials
    }

    #[test]
    fn trial_log_replaces_snapshot_reaction_times() {
        let service = AssessmentService::default();
        let request: ScoreRequest = serde_json::from_value(serde_json::json!({
            "iatAnswers": [500.0, 510.0],
            "explicitGoal": "Open a bakery",
        }))
        .expect("snapshot parses");

        let output = score_request(&service, request, Some(trials(520.0, 660.0)))
            .expect("ordered log scores");

        assert_eq!(output.result.answers.iat_reaction_times.len(), 114);
        assert!(output.result.scores.psci > 0.0);
        let summary = output.iat_summary.expect("summary from trial log");
        assert_eq!(summary.bias, IatBias::Receptive);
        assert_eq!(output.result.explicit_goal.as_deref(), Some("Open a bakery"));
    }

    #[test]
    fn snapshot_without_trial_log_scores_as_is() {
        let service = AssessmentService::default();

        let output =
            score_request(&service, ScoreRequest::default(), None).expect("empty snapshot scores");

        assert!(output.iat_summary.is_none());
        assert_eq!(output.result.scores.psci, 0.0);
        let json = serde_json::to_value(&output).expect("serializes");
        assert!(json.get("iatSummary").is_none());
        assert!(json["report"]["needs"].is_array());
    }

    #[test]
    fn shuffled_trial_log_is_refused() {
        let service = AssessmentService::default();
        let mut log = trials(520.0, 660.0);
        log.swap(30, 90);

        let err = score_request(&service, ScoreRequest::default(), Some(log))
            .expect_err("mis-ordered log");

        assert!(matches!(
            err,
            AppError::Import(paima::assessment::IatImportError::TrialOutOfPlace { row: 31, .. })
        ));
    }
}
