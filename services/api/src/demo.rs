use crate::infra::{assessment_service, classifier_config};
use clap::Args;
use paima::assessment::{
    AssessmentReport, AssessmentResult, AssessmentSession, AssessmentStage, GazeTarget,
    IatBlockKind, IatBlockLayout, IatStageResult, IatSummary, IatTrial, RawInputs,
    StageSubmission,
};
use paima::error::AppError;
use std::collections::BTreeMap;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Milliseconds the synthetic respondent spends looking at the threat image
    #[arg(long, default_value_t = 1_800.0)]
    pub(crate) monster_gaze_ms: f64,
    /// Milliseconds spent on the neutral image
    #[arg(long, default_value_t = 2_200.0)]
    pub(crate) forest_gaze_ms: f64,
    /// Goal recorded alongside the self-report answers
    #[arg(long)]
    pub(crate) goal: Option<String>,
    /// Print the full result as JSON after the summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        monster_gaze_ms,
        forest_gaze_ms,
        goal,
        json,
    } = args;

    let service = assessment_service(&classifier_config()?);
    let mut session = AssessmentSession::for_service(&service);

    println!("PAIMA assessment demo");
    for submission in synthetic_submissions(session.iat_layout(), goal) {
        let stage = session.stage();
        if stage == AssessmentStage::Implicit {
            session.record_gaze(GazeTarget::Monster, monster_gaze_ms);
            session.record_gaze(GazeTarget::Forest, forest_gaze_ms);
        }
        let next = session.submit(submission)?;
        println!("- {} complete -> {}", stage.label(), next.label());
    }

    let result = session.finish(&service)?;
    let report = AssessmentReport::build(&result);
    render_report(&result, &report, session.iat_summary());

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("\nResult payload:\n{}", json),
            Err(err) => println!("\nResult payload unavailable: {}", err),
        }
    }

    Ok(())
}

fn render_report(result: &AssessmentResult, report: &AssessmentReport, iat: Option<&IatSummary>) {
    println!("\nProfile: {}", report.profile_key);
    println!(
        "  dominant drive {} | strongest conflict {} | conflict tier {:?} | wellbeing tier {:?}",
        result.profile.dominant_drive.label(),
        result.profile.dominant_conflict.label(),
        report.conflict_tier,
        report.wellbeing_tier
    );
    if let Some(goal) = &result.explicit_goal {
        println!("  stated goal: {}", goal);
    }

    println!("\nMotives (implicit vs explicit, display percent)");
    for entry in &report.motive_comparison {
        println!(
            "  - {:<12} {:>5.1}% vs {:>5.1}% ({})",
            entry.motive_label,
            entry.implicit_percent,
            entry.explicit_percent,
            entry.implicit_interpretation.label()
        );
    }

    println!("Discrepancies");
    for entry in &report.discrepancies {
        let marker = if entry.warning { " !" } else { "" };
        println!(
            "  - {:<12} {:.2}{}",
            entry.motive_label, entry.score, marker
        );
    }

    println!("Needs and energy");
    for entry in &report.needs {
        println!(
            "  - {:<12} {:>5.1}% ({})",
            entry.label,
            entry.percent,
            entry.interpretation.label()
        );
    }
    println!(
        "  - {:<12} {:>5.1}% ({})",
        "Wellbeing",
        report.wellbeing_percent,
        report.wellbeing_interpretation.label()
    );

    println!(
        "Conflict index {:.2} (D-score {}, gaze adjustment {:+.2})",
        result.scores.psci,
        result
            .breakdown
            .d_score
            .map(|score| format!("{score:.2}"))
            .unwrap_or_else(|| "n/a".to_string()),
        result.breakdown.gaze_adjustment
    );
    if let Some(summary) = iat {
        println!(
            "  block means {:.0} ms vs {:.0} ms ({:+.0} ms, {:?}, {} errors)",
            summary.compatible_mean_rt,
            summary.incompatible_mean_rt,
            summary.difference_ms,
            summary.bias,
            summary.error_count
        );
    }
}

/// Deterministic answers for every stage: a respondent with a strong
/// unacknowledged power drive and middling wellbeing.
fn synthetic_submissions(layout: &IatBlockLayout, goal: Option<String>) -> Vec<StageSubmission> {
    let implicit: BTreeMap<String, i32> = (1..=6)
        .flat_map(|image| {
            (1..=6).map(move |question| {
                let rating = match question {
                    1 => 5,
                    2 => 4,
                    3 => 8,
                    4 => 2,
                    5 => 4,
                    _ => 3,
                };
                (RawInputs::implicit_key(image, question), rating)
            })
        })
        .collect();

    let explicit: BTreeMap<String, i32> = (0..18)
        .map(|index| {
            let rating = match index {
                0..=2 => 4,
                3..=5 => 2,
                _ => 3,
            };
            (index.to_string(), rating)
        })
        .collect();

    let wellbeing: BTreeMap<String, i32> = (0..18)
        .map(|index| {
            let rating = match index {
                16 => 4,
                17 => 3,
                _ if index % 3 == 0 => 2,
                _ => 3,
            };
            (index.to_string(), rating)
        })
        .collect();

    vec![
        StageSubmission::Intro,
        StageSubmission::Iat(IatStageResult::Trials {
            trials: synthetic_trials(layout),
        }),
        StageSubmission::Implicit(implicit),
        StageSubmission::Explicit {
            answers: explicit,
            explicit_goal: goal,
        },
        StageSubmission::Wellbeing(wellbeing),
    ]
}

fn synthetic_trials(layout: &IatBlockLayout) -> Vec<IatTrial> {
    let mut trials = Vec::with_capacity(layout.total_trials());
    for (position, block) in layout.blocks().iter().enumerate() {
        for trial in 0..block.trials {
            let (base, spread, step) = match block.kind {
                IatBlockKind::Compatible => (540.0, 90, 37),
                IatBlockKind::Incompatible => (620.0, 120, 53),
                _ => (700.0, 60, 29),
            };
            let scored = matches!(
                block.kind,
                IatBlockKind::Compatible | IatBlockKind::Incompatible
            );
            trials.push(IatTrial {
                block: position + 1,
                trial,
                stimulus: format!("{} / {}", block.left_label, block.right_label),
                category: if trial % 2 == 0 {
                    block.left_label.clone()
                } else {
                    block.right_label.clone()
                },
                rt_ms: base + ((trial * step) % spread) as f64,
                is_error: scored && trial % 13 == 12,
            });
        }
    }
    trials
}
