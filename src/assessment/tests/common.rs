use std::collections::BTreeMap;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{GazeTelemetry, RawInputs, ScoreVector};
use crate::assessment::iat::{IatBlockKind, IatBlockLayout, IatTrial};

pub(super) fn layout() -> IatBlockLayout {
    IatBlockLayout::standard()
}

/// Implicit answers for every image/question, rated by `rating(image, question)`.
pub(super) fn implicit_answers<F>(rating: F) -> BTreeMap<String, i32>
where
    F: Fn(usize, usize) -> i32,
{
    let mut answers = BTreeMap::new();
    for image in 1..=6 {
        for question in 1..=6 {
            answers.insert(RawInputs::implicit_key(image, question), rating(image, question));
        }
    }
    answers
}

/// Eighteen Likert answers, rated by `rating(index)`.
pub(super) fn survey_answers<F>(rating: F) -> BTreeMap<String, i32>
where
    F: Fn(usize) -> i32,
{
    (0..18).map(|index| (index.to_string(), rating(index))).collect()
}

/// Full 114-trial sequence; practice blocks sit at 700 ms.
pub(super) fn iat_sequence(compatible_ms: f64, incompatible_ms: f64) -> Vec<f64> {
    let layout = layout();
    let compatible = layout
        .block_range(IatBlockKind::Compatible)
        .expect("compatible block");
    let incompatible = layout
        .block_range(IatBlockKind::Incompatible)
        .expect("incompatible block");

    (0..layout.total_trials())
        .map(|index| {
            if compatible.contains(&index) {
                compatible_ms
            } else if incompatible.contains(&index) {
                incompatible_ms
            } else {
                700.0
            }
        })
        .collect()
}

/// Trial records matching [`iat_sequence`], with a few jittered values.
pub(super) fn iat_trials(compatible_ms: f64, incompatible_ms: f64) -> Vec<IatTrial> {
    let layout = layout();
    iat_sequence(compatible_ms, incompatible_ms)
        .into_iter()
        .enumerate()
        .map(|(index, rt_ms)| {
            let (block, trial) = layout.locate(index).expect("index inside layout");
            IatTrial {
                block: block + 1,
                trial,
                stimulus: format!("word-{index}"),
                category: "self".to_string(),
                rt_ms: rt_ms + (index % 3) as f64,
                is_error: false,
            }
        })
        .collect()
}

/// A complete, plausible session: engaged achievement, moderate elsewhere.
pub(super) fn complete_inputs() -> RawInputs {
    RawInputs {
        implicit_answers: implicit_answers(|_, question| match question {
            1 => 8,
            2 => 3,
            3 => 5,
            4 => 5,
            5 => 6,
            _ => 4,
        }),
        explicit_answers: survey_answers(|index| (index % 5) as i32 + 1),
        wellbeing_answers: survey_answers(|index| if index < 16 { 4 } else { 2 }),
        iat_reaction_times: iat_sequence(540.0, 610.0),
        gaze_telemetry: Some(GazeTelemetry::new(1800.0, 2200.0)),
    }
}

pub(super) fn fields_within(scores: &ScoreVector, bound: f64) -> bool {
    scores
        .named_fields()
        .iter()
        .filter(|(name, _)| *name != "Z_PSCI")
        .all(|(_, value)| value.abs() <= bound)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
