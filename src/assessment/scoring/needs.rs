use super::super::domain::{Need, RawInputs};
use super::scale::map_to_z;
use super::schema::QuestionnaireSchema;

/// Standardized wellbeing-survey composites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WellbeingSignals {
    pub autonomy: f64,
    pub competence: f64,
    pub relatedness: f64,
    pub wellbeing: f64,
    pub depletion: f64,
    pub external: f64,
}

pub(crate) fn score_wellbeing(raw: &RawInputs, schema: &QuestionnaireSchema) -> WellbeingSignals {
    let composite = |indices: &[usize]| {
        let mean = if indices.is_empty() {
            0.0
        } else {
            indices
                .iter()
                .map(|index| raw.wellbeing_item(*index))
                .sum::<f64>()
                / indices.len() as f64
        };
        map_to_z(mean, 0.0, schema.likert_max)
    };
    let need = |need: Need| {
        schema
            .need_items(need)
            .map(|items| composite(items.indices.as_slice()))
            .unwrap_or_else(|| map_to_z(0.0, 0.0, schema.likert_max))
    };

    WellbeingSignals {
        autonomy: need(Need::Autonomy),
        competence: need(Need::Competence),
        relatedness: need(Need::Relatedness),
        wellbeing: composite(schema.wellbeing.as_slice()),
        depletion: composite(schema.depletion.as_slice()),
        external: composite(schema.external.as_slice()),
    }
}
