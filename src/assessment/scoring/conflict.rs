use super::super::domain::GazeTelemetry;
use super::super::iat::{d_score, IatBlockLayout};

pub(crate) struct ConflictSignals {
    /// `None` when the trial sequence was too short to score.
    pub d_score: Option<f64>,
    pub gaze_adjustment: f64,
}

impl ConflictSignals {
    /// D-score (0 when unavailable) minus the gaze adjustment.
    pub fn psci(&self) -> f64 {
        self.d_score.unwrap_or(0.0) - self.gaze_adjustment
    }
}

pub(crate) fn score_conflict(
    reaction_times: &[f64],
    gaze: Option<&GazeTelemetry>,
    layout: &IatBlockLayout,
) -> ConflictSignals {
    ConflictSignals {
        d_score: d_score(reaction_times, layout),
        gaze_adjustment: gaze.map(gaze_adjustment).unwrap_or(0.0),
    }
}

/// `monster share - 0.5`, always within [-0.5, +0.5].
///
/// Sustained attention on the threatening figure lowers the reported
/// conflict. Negative accumulators count as zero; a record with a
/// non-finite accumulator is ignored entirely.
pub fn gaze_adjustment(gaze: &GazeTelemetry) -> f64 {
    if !(gaze.monster_gaze.is_finite() && gaze.forest_gaze.is_finite()) {
        return 0.0;
    }
    let monster = gaze.monster_gaze.max(0.0);
    let forest = gaze.forest_gaze.max(0.0);
    let total = monster + forest;
    if !(total > 0.0 && total.is_finite()) {
        return 0.0;
    }
    monster / total - 0.5
}
