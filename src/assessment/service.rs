use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{RawInputs, ScoreVector};
use super::profile::{ClassifierConfig, ProfileClassifier, ProfileOutcome};
use super::scoring::{ScoreAggregator, ScoreBreakdown};

/// Composes the score aggregator and the profile classifier.
///
/// Holds configuration only; every call is independent, so one instance can
/// be shared across sessions and threads.
#[derive(Debug, Clone, Default)]
pub struct AssessmentService {
    aggregator: ScoreAggregator,
    classifier: ProfileClassifier,
}

impl AssessmentService {
    pub fn new(aggregator: ScoreAggregator, classifier: ProfileClassifier) -> Self {
        Self {
            aggregator,
            classifier,
        }
    }

    pub fn with_classifier_config(config: ClassifierConfig) -> Self {
        Self::new(ScoreAggregator::default(), ProfileClassifier::new(config))
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    pub fn classifier(&self) -> &ProfileClassifier {
        &self.classifier
    }

    /// Score a snapshot and classify it in one pass.
    pub fn assess(&self, answers: RawInputs, explicit_goal: Option<String>) -> AssessmentResult {
        let (scores, breakdown) = self.aggregator.score_with_breakdown(&answers);
        let profile = self.classifier.classify(&scores);

        info!(
            profile = profile.profile_key.as_str(),
            iat_scored = breakdown.d_score.is_some(),
            "assessment completed"
        );

        AssessmentResult {
            scores,
            profile,
            breakdown,
            completed_at: Utc::now(),
            answers,
            explicit_goal,
        }
    }

    pub fn classify(&self, scores: &ScoreVector) -> ProfileOutcome {
        self.classifier.classify(scores)
    }
}

/// Everything produced for one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub scores: ScoreVector,
    pub profile: ProfileOutcome,
    pub breakdown: ScoreBreakdown,
    pub completed_at: DateTime<Utc>,
    pub answers: RawInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_goal: Option<String>,
}
