//! Caller-owned bookkeeping for one respondent working through the instruments.
//!
//! The scoring core never sees a session; it only receives the
//! [`RawInputs`] snapshot a session produces. Each stage hands over a typed
//! [`StageSubmission`] that is validated here, at the boundary, before it is
//! merged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{GazeTelemetry, RawInputs};
use super::iat::{reaction_times, IatBlockLayout, IatSummary, IatTrial};
use super::service::{AssessmentResult, AssessmentService};

pub const IMPLICIT_QUESTIONS_PER_IMAGE: usize = 6;
pub const IMPLICIT_RATING_MAX: i32 = 10;
pub const SURVEY_ITEMS: usize = 18;
pub const LIKERT_MIN: i32 = 1;
pub const LIKERT_MAX: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStage {
    Intro,
    Iat,
    Implicit,
    Explicit,
    Wellbeing,
    Result,
}

impl AssessmentStage {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Intro,
            Self::Iat,
            Self::Implicit,
            Self::Explicit,
            Self::Wellbeing,
            Self::Result,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Intro => "Introduction",
            Self::Iat => "Implicit Association Test",
            Self::Implicit => "Projective Images",
            Self::Explicit => "Self Report",
            Self::Wellbeing => "Wellbeing",
            Self::Result => "Result",
        }
    }

    pub fn next(self) -> Self {
        let stages = Self::ordered();
        let index = stages.iter().position(|stage| *stage == self).unwrap_or(0);
        stages[(index + 1).min(stages.len() - 1)]
    }

    pub fn previous(self) -> Self {
        let stages = Self::ordered();
        let index = stages.iter().position(|stage| *stage == self).unwrap_or(0);
        stages[index.saturating_sub(1)]
    }
}

/// Output of the IAT instrument: either bare reaction times or full trial records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IatStageResult {
    ReactionTimes { reaction_times: Vec<f64> },
    Trials { trials: Vec<IatTrial> },
}

/// Typed payload for each stage, replacing free-form result objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "payload", rename_all = "snake_case")]
pub enum StageSubmission {
    Intro,
    Iat(IatStageResult),
    Implicit(BTreeMap<String, i32>),
    Explicit {
        answers: BTreeMap<String, i32>,
        #[serde(default)]
        explicit_goal: Option<String>,
    },
    Wellbeing(BTreeMap<String, i32>),
}

impl StageSubmission {
    pub fn stage(&self) -> AssessmentStage {
        match self {
            Self::Intro => AssessmentStage::Intro,
            Self::Iat(_) => AssessmentStage::Iat,
            Self::Implicit(_) => AssessmentStage::Implicit,
            Self::Explicit { .. } => AssessmentStage::Explicit,
            Self::Wellbeing(_) => AssessmentStage::Wellbeing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GazeTarget {
    Monster,
    Forest,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("expected a {expected:?} submission, received {received:?}")]
    StageMismatch {
        expected: AssessmentStage,
        received: AssessmentStage,
    },
    #[error("answer key '{key}' is not part of the {stage:?} instrument")]
    InvalidAnswerKey { stage: AssessmentStage, key: String },
    #[error("answer '{key}' = {value} is outside {min}..={max}")]
    AnswerOutOfRange {
        key: String,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("reaction time at trial {index} must be a positive duration, got {value}")]
    InvalidReactionTime { index: usize, value: f64 },
    #[error("trial record {index} is tagged block {block} trial {trial}, which is not its place in the block layout")]
    TrialOutOfPlace {
        index: usize,
        block: usize,
        trial: usize,
    },
    #[error("session is at {0:?}; results are only available after the wellbeing stage")]
    NotFinished(AssessmentStage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSession {
    stage: AssessmentStage,
    layout: IatBlockLayout,
    image_count: usize,
    answers: RawInputs,
    gaze: GazeTelemetry,
    iat_summary: Option<IatSummary>,
    explicit_goal: Option<String>,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new(IatBlockLayout::standard())
    }
}

impl AssessmentSession {
    pub fn new(layout: IatBlockLayout) -> Self {
        Self {
            stage: AssessmentStage::Intro,
            layout,
            image_count: 6,
            answers: RawInputs::default(),
            gaze: GazeTelemetry::default(),
            iat_summary: None,
            explicit_goal: None,
        }
    }

    /// Session whose IAT layout and image count match the service's schema.
    pub fn for_service(service: &AssessmentService) -> Self {
        let mut session = Self::new(service.aggregator().layout().clone());
        session.image_count = service.aggregator().schema().image_count;
        session
    }

    pub fn stage(&self) -> AssessmentStage {
        self.stage
    }

    /// Layout the IAT runner must follow so trial indices line up with scoring.
    pub fn iat_layout(&self) -> &IatBlockLayout {
        &self.layout
    }

    pub fn iat_summary(&self) -> Option<&IatSummary> {
        self.iat_summary.as_ref()
    }

    pub fn explicit_goal(&self) -> Option<&str> {
        self.explicit_goal.as_deref()
    }

    /// Validate and merge a stage payload, then advance.
    pub fn submit(&mut self, submission: StageSubmission) -> Result<AssessmentStage, SessionError> {
        let received = submission.stage();
        if received != self.stage {
            return Err(SessionError::StageMismatch {
                expected: self.stage,
                received,
            });
        }

        match submission {
            StageSubmission::Intro => {}
            StageSubmission::Iat(result) => self.accept_iat(result)?,
            StageSubmission::Implicit(answers) => {
                for (key, value) in &answers {
                    self.validate_implicit(key, *value)?;
                }
                self.answers.implicit_answers.extend(answers);
            }
            StageSubmission::Explicit {
                answers,
                explicit_goal,
            } => {
                validate_survey(AssessmentStage::Explicit, &answers)?;
                self.answers.explicit_answers.extend(answers);
                if let Some(goal) = explicit_goal.filter(|goal| !goal.trim().is_empty()) {
                    self.explicit_goal = Some(goal);
                }
            }
            StageSubmission::Wellbeing(answers) => {
                validate_survey(AssessmentStage::Wellbeing, &answers)?;
                self.answers.wellbeing_answers.extend(answers);
            }
        }

        self.stage = self.stage.next();
        debug!(stage = self.stage.label(), "assessment stage advanced");
        Ok(self.stage)
    }

    /// Step back one stage; answers already given are kept.
    pub fn back(&mut self) -> AssessmentStage {
        self.stage = self.stage.previous();
        self.stage
    }

    /// Accumulate attention time; negative or non-finite durations are dropped.
    pub fn record_gaze(&mut self, target: GazeTarget, ms: f64) {
        if !(ms.is_finite() && ms > 0.0) {
            return;
        }
        match target {
            GazeTarget::Monster => self.gaze.monster_gaze += ms,
            GazeTarget::Forest => self.gaze.forest_gaze += ms,
        }
    }

    pub fn raw_inputs(&self) -> RawInputs {
        let mut raw = self.answers.clone();
        if self.gaze.monster_gaze + self.gaze.forest_gaze > 0.0 {
            raw.gaze_telemetry = Some(self.gaze);
        }
        raw
    }

    pub fn finish(&self, service: &AssessmentService) -> Result<AssessmentResult, SessionError> {
        if self.stage != AssessmentStage::Result {
            return Err(SessionError::NotFinished(self.stage));
        }
        Ok(service.assess(self.raw_inputs(), self.explicit_goal.clone()))
    }

    pub fn reset(&mut self) {
        let layout = std::mem::take(&mut self.layout);
        let image_count = self.image_count;
        *self = Self::new(layout);
        self.image_count = image_count;
    }

    fn accept_iat(&mut self, result: IatStageResult) -> Result<(), SessionError> {
        let (times, summary) = match result {
            IatStageResult::ReactionTimes { reaction_times } => (reaction_times, None),
            IatStageResult::Trials { trials } => {
                if let Some(index) = self.layout.first_misplaced(&trials) {
                    let record = &trials[index];
                    return Err(SessionError::TrialOutOfPlace {
                        index,
                        block: record.block,
                        trial: record.trial,
                    });
                }
                let summary = IatSummary::from_trials(&trials, &self.layout);
                (reaction_times(&trials), Some(summary))
            }
        };

        if let Some((index, value)) = times
            .iter()
            .enumerate()
            .find(|(_, value)| !(value.is_finite() && **value > 0.0))
        {
            return Err(SessionError::InvalidReactionTime {
                index,
                value: *value,
            });
        }

        let expected = self.layout.total_trials();
        if times.len() != expected {
            warn!(
                received = times.len(),
                expected, "IAT trial count does not match the block layout"
            );
        }

        self.answers.iat_reaction_times = times;
        self.iat_summary = summary;
        Ok(())
    }

    fn validate_implicit(&self, key: &str, value: i32) -> Result<(), SessionError> {
        let invalid_key = || SessionError::InvalidAnswerKey {
            stage: AssessmentStage::Implicit,
            key: key.to_string(),
        };
        let (image, question) = parse_implicit_key(key).ok_or_else(invalid_key)?;
        if !(1..=self.image_count).contains(&image)
            || !(1..=IMPLICIT_QUESTIONS_PER_IMAGE).contains(&question)
        {
            return Err(invalid_key());
        }
        check_range(key, value, 0, IMPLICIT_RATING_MAX)
    }
}

fn parse_implicit_key(key: &str) -> Option<(usize, usize)> {
    let (image, question) = key.strip_prefix("img")?.split_once("_q")?;
    Some((image.parse().ok()?, question.parse().ok()?))
}

fn validate_survey(
    stage: AssessmentStage,
    answers: &BTreeMap<String, i32>,
) -> Result<(), SessionError> {
    for (key, value) in answers {
        match key.parse::<usize>() {
            Ok(index) if index < SURVEY_ITEMS => {}
            _ => {
                return Err(SessionError::InvalidAnswerKey {
                    stage,
                    key: key.clone(),
                })
            }
        }
        check_range(key, *value, LIKERT_MIN, LIKERT_MAX)?;
    }
    Ok(())
}

fn check_range(key: &str, value: i32, min: i32, max: i32) -> Result<(), SessionError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SessionError::AnswerOutOfRange {
            key: key.to_string(),
            value,
            min,
            max,
        })
    }
}
