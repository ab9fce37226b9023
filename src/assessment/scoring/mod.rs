mod conflict;
mod motives;
mod needs;
mod scale;
mod schema;

pub use conflict::gaze_adjustment;
pub use scale::map_to_z;
pub use schema::{ExplicitItems, ImplicitItems, NeedItems, QuestionnaireSchema};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Motive, RawInputs, ScoreVector};
use super::iat::IatBlockLayout;

/// Stateless aggregator turning raw answer buckets into a [`ScoreVector`].
///
/// Scoring is total: missing answers fall back to the scale floor and a short
/// IAT sequence contributes a neutral 0 instead of failing.
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    schema: QuestionnaireSchema,
    layout: IatBlockLayout,
}

impl ScoreAggregator {
    pub fn new(schema: QuestionnaireSchema, layout: IatBlockLayout) -> Self {
        Self { schema, layout }
    }

    pub fn schema(&self) -> &QuestionnaireSchema {
        &self.schema
    }

    pub fn layout(&self) -> &IatBlockLayout {
        &self.layout
    }

    pub fn score(&self, raw: &RawInputs) -> ScoreVector {
        self.score_with_breakdown(raw).0
    }

    /// Score plus the unstandardized intermediates, for audits and reports.
    pub fn score_with_breakdown(&self, raw: &RawInputs) -> (ScoreVector, ScoreBreakdown) {
        let motives = motives::score_motives(raw, &self.schema);
        let wellbeing = needs::score_wellbeing(raw, &self.schema);
        let conflict = conflict::score_conflict(
            &raw.iat_reaction_times,
            raw.gaze_telemetry.as_ref(),
            &self.layout,
        );

        let mut vector = ScoreVector {
            psci: conflict.psci(),
            need_autonomy: wellbeing.autonomy,
            need_competence: wellbeing.competence,
            need_relatedness: wellbeing.relatedness,
            wellbeing: wellbeing.wellbeing,
            depletion: wellbeing.depletion,
            external: wellbeing.external,
            ..ScoreVector::default()
        };

        let mut motive_breakdown = Vec::with_capacity(motives.len());
        for signal in &motives {
            let (implicit, explicit, discrepancy) = match signal.motive {
                Motive::Achievement => (
                    &mut vector.implicit_achievement,
                    &mut vector.explicit_achievement,
                    &mut vector.mdi_achievement,
                ),
                Motive::Power => (
                    &mut vector.implicit_power,
                    &mut vector.explicit_power,
                    &mut vector.mdi_power,
                ),
                Motive::Affiliation => (
                    &mut vector.implicit_affiliation,
                    &mut vector.explicit_affiliation,
                    &mut vector.mdi_affiliation,
                ),
            };
            *implicit = signal.implicit_z;
            *explicit = signal.explicit_z;
            *discrepancy = signal.discrepancy();

            motive_breakdown.push(MotiveBreakdown {
                motive: signal.motive,
                implicit_raw: signal.implicit_raw,
                explicit_raw: signal.explicit_raw,
            });
        }

        debug!(
            iat_trials = raw.iat_reaction_times.len(),
            iat_scored = conflict.d_score.is_some(),
            gaze_adjustment = conflict.gaze_adjustment,
            psci = vector.psci,
            "computed assessment scores"
        );

        let breakdown = ScoreBreakdown {
            motives: motive_breakdown,
            d_score: conflict.d_score,
            gaze_adjustment: conflict.gaze_adjustment,
        };

        (vector, breakdown)
    }
}

/// Score raw inputs with the canonical questionnaire and IAT layout.
pub fn compute_scores(raw: &RawInputs) -> ScoreVector {
    ScoreAggregator::default().score(raw)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotiveBreakdown {
    pub motive: Motive,
    /// `sum(hope) - sum(fear)` before standardization.
    pub implicit_raw: f64,
    /// Item mean on the 0–4 scale.
    pub explicit_raw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub motives: Vec<MotiveBreakdown>,
    /// IAT D-score before the gaze adjustment; `None` below the trial minimum.
    pub d_score: Option<f64>,
    pub gaze_adjustment: f64,
}
