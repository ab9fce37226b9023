mod config;
mod policy;
mod ranking;

pub use config::ClassifierConfig;
pub use policy::{ConflictTier, ProfileKey, WellbeingTier};
pub use ranking::RankedDimension;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Motive, ScoreVector};
use policy::{conflict_tier, decide_profile, wellbeing_tier};
use ranking::rank_motives;

/// Stateless rule-based classifier applying the thresholds to a score vector.
#[derive(Debug, Clone, Default)]
pub struct ProfileClassifier {
    config: ClassifierConfig,
}

impl ProfileClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, scores: &ScoreVector) -> ProfileOutcome {
        let rankings = rank_motives(|motive| scores.discrepancy(motive));
        let drive_rankings = rank_motives(|motive| scores.implicit(motive));

        let dominant_conflict = rankings
            .first()
            .map(|entry| entry.dimension)
            .unwrap_or(Motive::PRIORITY[0]);
        let dominant_drive = drive_rankings
            .first()
            .map(|entry| entry.dimension)
            .unwrap_or(Motive::PRIORITY[0]);

        let conflict_tier = conflict_tier(scores, &self.config);
        let wellbeing_tier = wellbeing_tier(scores, &self.config);
        let profile_key = decide_profile(dominant_drive, conflict_tier, wellbeing_tier);

        debug!(
            profile = profile_key.as_str(),
            ?dominant_drive,
            ?conflict_tier,
            ?wellbeing_tier,
            "classified assessment profile"
        );

        ProfileOutcome {
            profile_key,
            rankings,
            drive_rankings,
            dominant_drive,
            dominant_conflict,
            conflict_tier,
            wellbeing_tier,
        }
    }
}

/// Classify with the default thresholds.
pub fn classify_profile(scores: &ScoreVector) -> ProfileOutcome {
    ProfileClassifier::default().classify(scores)
}

/// Classifier output: the profile plus everything the report needs to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOutcome {
    pub profile_key: ProfileKey,
    /// Motive discrepancies, largest first.
    pub rankings: Vec<RankedDimension>,
    /// Implicit motive scores, strongest first.
    pub drive_rankings: Vec<RankedDimension>,
    pub dominant_drive: Motive,
    pub dominant_conflict: Motive,
    pub conflict_tier: ConflictTier,
    pub wellbeing_tier: WellbeingTier,
}
