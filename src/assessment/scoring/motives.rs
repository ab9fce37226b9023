use super::super::domain::{Motive, RawInputs};
use super::scale::map_to_z;
use super::schema::QuestionnaireSchema;

/// Raw and standardized motive scores for one domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MotiveSignal {
    pub motive: Motive,
    pub implicit_raw: f64,
    pub implicit_z: f64,
    pub explicit_raw: f64,
    pub explicit_z: f64,
}

impl MotiveSignal {
    /// Absolute gap between the explicit and implicit standardized scores.
    pub fn discrepancy(&self) -> f64 {
        (self.explicit_z - self.implicit_z).abs()
    }
}

pub(crate) fn score_motives(raw: &RawInputs, schema: &QuestionnaireSchema) -> Vec<MotiveSignal> {
    Motive::ordered()
        .into_iter()
        .map(|motive| {
            let implicit_raw = implicit_raw(raw, schema, motive);
            let explicit_raw = explicit_raw(raw, schema, motive);
            let (min, max) = schema.implicit_bounds;

            MotiveSignal {
                motive,
                implicit_raw,
                implicit_z: map_to_z(implicit_raw, min, max),
                explicit_raw,
                explicit_z: map_to_z(explicit_raw, 0.0, schema.likert_max),
            }
        })
        .collect()
}

/// `sum(hope) - sum(fear)` across every image.
fn implicit_raw(raw: &RawInputs, schema: &QuestionnaireSchema, motive: Motive) -> f64 {
    let Some(items) = schema.implicit_items(motive) else {
        return 0.0;
    };

    (1..=schema.image_count)
        .map(|image| {
            let hope = raw.implicit(image, items.hope_question);
            let fear = raw.implicit(image, items.fear_question);
            f64::from(hope) - f64::from(fear)
        })
        .sum()
}

/// Mean of the motive's items on the 0–4 scale.
fn explicit_raw(raw: &RawInputs, schema: &QuestionnaireSchema, motive: Motive) -> f64 {
    match schema.explicit_items(motive) {
        Some(items) if !items.indices.is_empty() => {
            let sum: f64 = items
                .indices
                .iter()
                .map(|index| raw.explicit_item(*index))
                .sum();
            sum / items.indices.len() as f64
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_raw_is_hope_minus_fear_over_images() {
        let mut raw = RawInputs::default();
        for image in 1..=6 {
            raw.implicit_answers
                .insert(RawInputs::implicit_key(image, 3), 4);
            raw.implicit_answers
                .insert(RawInputs::implicit_key(image, 4), 2);
        }

        let signals = score_motives(&raw, &QuestionnaireSchema::canonical());
        let power = signals
            .iter()
            .find(|signal| signal.motive == Motive::Power)
            .expect("power scored");

        assert_eq!(power.implicit_raw, 12.0);
        assert_eq!(power.implicit_z, 1.0);
    }

    #[test]
    fn explicit_raw_averages_the_item_triple() {
        let mut raw = RawInputs::default();
        raw.explicit_answers.insert("6".to_string(), 5);
        raw.explicit_answers.insert("7".to_string(), 3);
        raw.explicit_answers.insert("8".to_string(), 1);

        let signals = score_motives(&raw, &QuestionnaireSchema::canonical());
        let affiliation = signals
            .iter()
            .find(|signal| signal.motive == Motive::Affiliation)
            .expect("affiliation scored");

        assert_eq!(affiliation.explicit_raw, 2.0);
        assert_eq!(affiliation.explicit_z, 0.0);
        assert_eq!(affiliation.discrepancy(), 0.0);
    }
}
