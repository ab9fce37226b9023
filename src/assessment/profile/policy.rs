use serde::{Deserialize, Serialize};

use super::super::domain::{Motive, ScoreVector};
use super::config::ClassifierConfig;

/// Closed set of profile labels the report layer knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileKey {
    IntegratedSage,
    ExhaustedHero,
    OverloadedCaregiver,
    DormantRuler,
    SuppressedCreator,
    ConflictedLover,
    WanderingExplorer,
}

impl ProfileKey {
    pub const fn all() -> [Self; 7] {
        [
            Self::IntegratedSage,
            Self::ExhaustedHero,
            Self::OverloadedCaregiver,
            Self::DormantRuler,
            Self::SuppressedCreator,
            Self::ConflictedLover,
            Self::WanderingExplorer,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IntegratedSage => "INTEGRATED_SAGE",
            Self::ExhaustedHero => "EXHAUSTED_HERO",
            Self::OverloadedCaregiver => "OVERLOADED_CAREGIVER",
            Self::DormantRuler => "DORMANT_RULER",
            Self::SuppressedCreator => "SUPPRESSED_CREATOR",
            Self::ConflictedLover => "CONFLICTED_LOVER",
            Self::WanderingExplorer => "WANDERING_EXPLORER",
        }
    }

    /// Lenient lookup for stored keys; unknown keys map to the fallback profile.
    pub fn from_key(key: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(key.trim()))
            .unwrap_or(Self::WanderingExplorer)
    }
}

impl std::fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellbeingTier {
    Integrated,
    Steady,
    Strained,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictTier {
    Low,
    Moderate,
    High,
}

pub(crate) fn wellbeing_tier(scores: &ScoreVector, config: &ClassifierConfig) -> WellbeingTier {
    let wellbeing = scores.wellbeing;

    if wellbeing <= config.low_wellbeing && scores.depletion >= config.high_depletion {
        WellbeingTier::Exhausted
    } else if wellbeing >= config.high_wellbeing
        && scores.max_discrepancy() < config.integrated_max_discrepancy
    {
        WellbeingTier::Integrated
    } else if wellbeing < config.low_wellbeing {
        WellbeingTier::Strained
    } else {
        WellbeingTier::Steady
    }
}

pub(crate) fn conflict_tier(scores: &ScoreVector, config: &ClassifierConfig) -> ConflictTier {
    let discrepancy = scores.max_discrepancy();

    if discrepancy >= config.high_discrepancy || scores.psci >= config.high_psci {
        ConflictTier::High
    } else if discrepancy >= config.moderate_discrepancy || scores.psci >= config.moderate_psci {
        ConflictTier::Moderate
    } else {
        ConflictTier::Low
    }
}

pub(crate) fn decide_profile(
    dominant_drive: Motive,
    conflict: ConflictTier,
    wellbeing: WellbeingTier,
) -> ProfileKey {
    match (wellbeing, conflict, dominant_drive) {
        (WellbeingTier::Integrated, _, _) => ProfileKey::IntegratedSage,
        (WellbeingTier::Exhausted, _, Motive::Affiliation) => ProfileKey::OverloadedCaregiver,
        (WellbeingTier::Exhausted, _, Motive::Achievement | Motive::Power) => {
            ProfileKey::ExhaustedHero
        }
        (_, ConflictTier::Low, _) => ProfileKey::WanderingExplorer,
        (_, _, Motive::Power) => ProfileKey::DormantRuler,
        (_, _, Motive::Achievement) => ProfileKey::SuppressedCreator,
        (_, _, Motive::Affiliation) => ProfileKey::ConflictedLover,
    }
}
