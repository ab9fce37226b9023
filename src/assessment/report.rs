//! Presentation-ready views derived from a finished assessment.
//!
//! The scoring core stays on the standardized scale; everything here remaps
//! it for charts and labels and never feeds back into classification.

use serde::{Deserialize, Serialize};

use super::domain::{Motive, Need, ScoreVector};
use super::profile::{ConflictTier, ProfileKey, RankedDimension, WellbeingTier};
use super::service::AssessmentResult;

/// Discrepancies above this are highlighted in the report.
pub const DISCREPANCY_WARNING: f64 = 1.0;

/// Standardized score → 10–90 percent display scale.
pub fn display_percent(z: f64) -> f64 {
    if z.is_nan() {
        return 50.0;
    }
    (z * 20.0 + 50.0).clamp(10.0, 90.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    VeryLow,
    Low,
    Average,
    High,
    VeryHigh,
}

impl Interpretation {
    pub fn from_z(z: f64) -> Self {
        if z < -1.5 {
            Self::VeryLow
        } else if z < -0.5 {
            Self::Low
        } else if z <= 0.5 {
            Self::Average
        } else if z <= 1.5 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Average => "average",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MotiveComparisonEntry {
    pub motive: Motive,
    pub motive_label: &'static str,
    pub implicit_percent: f64,
    pub explicit_percent: f64,
    pub implicit_interpretation: Interpretation,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscrepancyEntry {
    pub motive: Motive,
    pub motive_label: &'static str,
    pub score: f64,
    pub percent: f64,
    pub warning: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NeedEntry {
    pub label: &'static str,
    pub percent: f64,
    pub interpretation: Interpretation,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub profile_key: ProfileKey,
    pub conflict_tier: ConflictTier,
    pub wellbeing_tier: WellbeingTier,
    pub motive_comparison: Vec<MotiveComparisonEntry>,
    /// Ordered like the classifier's discrepancy ranking.
    pub discrepancies: Vec<DiscrepancyEntry>,
    pub needs: Vec<NeedEntry>,
    pub wellbeing_percent: f64,
    pub wellbeing_interpretation: Interpretation,
    pub conflict_interpretation: Interpretation,
}

impl AssessmentReport {
    pub fn build(result: &AssessmentResult) -> Self {
        let scores = &result.scores;

        AssessmentReport {
            profile_key: result.profile.profile_key,
            conflict_tier: result.profile.conflict_tier,
            wellbeing_tier: result.profile.wellbeing_tier,
            motive_comparison: Motive::ordered()
                .into_iter()
                .map(|motive| MotiveComparisonEntry {
                    motive,
                    motive_label: motive.label(),
                    implicit_percent: display_percent(scores.implicit(motive)),
                    explicit_percent: display_percent(scores.explicit(motive)),
                    implicit_interpretation: Interpretation::from_z(scores.implicit(motive)),
                })
                .collect(),
            discrepancies: discrepancy_entries(&result.profile.rankings),
            needs: need_entries(scores),
            wellbeing_percent: display_percent(scores.wellbeing),
            wellbeing_interpretation: Interpretation::from_z(scores.wellbeing),
            conflict_interpretation: Interpretation::from_z(scores.psci),
        }
    }
}

fn discrepancy_entries(rankings: &[RankedDimension]) -> Vec<DiscrepancyEntry> {
    rankings
        .iter()
        .map(|entry| DiscrepancyEntry {
            motive: entry.dimension,
            motive_label: entry.dimension.label(),
            score: entry.score,
            percent: display_percent(entry.score),
            warning: entry.score > DISCREPANCY_WARNING,
        })
        .collect()
}

/// The three needs followed by willpower, shown inverted from depletion.
fn need_entries(scores: &ScoreVector) -> Vec<NeedEntry> {
    let mut entries: Vec<NeedEntry> = Need::ordered()
        .into_iter()
        .map(|need| NeedEntry {
            label: need.label(),
            percent: display_percent(scores.need(need)),
            interpretation: Interpretation::from_z(scores.need(need)),
        })
        .collect();

    entries.push(NeedEntry {
        label: "Willpower",
        percent: 100.0 - display_percent(scores.depletion),
        interpretation: Interpretation::from_z(-scores.depletion),
    });
    entries
}
