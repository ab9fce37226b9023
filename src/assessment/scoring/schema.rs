use serde::{Deserialize, Serialize};

use super::super::domain::{Motive, Need};

/// Hope/fear question pair asked about every projective image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicitItems {
    pub motive: Motive,
    pub hope_question: usize,
    pub fear_question: usize,
}

/// Explicit survey items averaged into one motive score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitItems {
    pub motive: Motive,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedItems {
    pub need: Need,
    pub indices: Vec<usize>,
}

/// Fixed item-to-construct mapping of the three questionnaires.
///
/// Item indices are zero-based positions in the 18-item explicit and
/// wellbeing surveys; image and question numbers are one-based, matching the
/// `img{n}_q{m}` answer keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSchema {
    pub image_count: usize,
    pub implicit: Vec<ImplicitItems>,
    /// Normalization bounds for `sum(hope) - sum(fear)`.
    pub implicit_bounds: (f64, f64),
    pub explicit: Vec<ExplicitItems>,
    pub needs: Vec<NeedItems>,
    pub wellbeing: Vec<usize>,
    pub depletion: Vec<usize>,
    pub external: Vec<usize>,
    /// Upper end of the internal Likert scale (ratings 1–5 read as 0–4).
    pub likert_max: f64,
}

impl Default for QuestionnaireSchema {
    fn default() -> Self {
        Self::canonical()
    }
}

impl QuestionnaireSchema {
    pub fn canonical() -> Self {
        Self {
            image_count: 6,
            implicit: vec![
                ImplicitItems {
                    motive: Motive::Achievement,
                    hope_question: 1,
                    fear_question: 2,
                },
                ImplicitItems {
                    motive: Motive::Power,
                    hope_question: 3,
                    fear_question: 4,
                },
                ImplicitItems {
                    motive: Motive::Affiliation,
                    hope_question: 5,
                    fear_question: 6,
                },
            ],
            implicit_bounds: (-24.0, 24.0),
            explicit: vec![
                ExplicitItems {
                    motive: Motive::Achievement,
                    indices: vec![0, 1, 2],
                },
                ExplicitItems {
                    motive: Motive::Power,
                    indices: vec![3, 4, 5],
                },
                ExplicitItems {
                    motive: Motive::Affiliation,
                    indices: vec![6, 7, 8],
                },
            ],
            needs: vec![
                NeedItems {
                    need: Need::Autonomy,
                    indices: vec![0, 1],
                },
                NeedItems {
                    need: Need::Competence,
                    indices: vec![2, 3],
                },
                NeedItems {
                    need: Need::Relatedness,
                    indices: vec![4, 5],
                },
            ],
            wellbeing: (6..=15).collect(),
            depletion: vec![16],
            external: vec![17],
            likert_max: 4.0,
        }
    }

    pub fn implicit_items(&self, motive: Motive) -> Option<&ImplicitItems> {
        self.implicit.iter().find(|items| items.motive == motive)
    }

    pub fn explicit_items(&self, motive: Motive) -> Option<&ExplicitItems> {
        self.explicit.iter().find(|items| items.motive == motive)
    }

    pub fn need_items(&self, need: Need) -> Option<&NeedItems> {
        self.needs.iter().find(|items| items.need == need)
    }
}
