use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The three motive domains measured both implicitly and explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motive {
    Achievement,
    Power,
    Affiliation,
}

impl Motive {
    /// Fixed precedence applied whenever two motives tie.
    pub const PRIORITY: [Self; 3] = [Self::Power, Self::Achievement, Self::Affiliation];

    pub const fn ordered() -> [Self; 3] {
        [Self::Achievement, Self::Power, Self::Affiliation]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Achievement => "Achievement",
            Self::Power => "Power",
            Self::Affiliation => "Affiliation",
        }
    }

    /// Position in [`Motive::PRIORITY`]; lower wins ties.
    pub fn priority_rank(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|motive| *motive == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

/// Basic psychological needs captured by the wellbeing survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Need {
    Autonomy,
    Competence,
    Relatedness,
}

impl Need {
    pub const fn ordered() -> [Self; 3] {
        [Self::Autonomy, Self::Competence, Self::Relatedness]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Autonomy => "Autonomy",
            Self::Competence => "Competence",
            Self::Relatedness => "Relatedness",
        }
    }
}

/// Attention accumulated during the narrative interlude, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GazeTelemetry {
    #[serde(default)]
    pub monster_gaze: f64,
    #[serde(default)]
    pub forest_gaze: f64,
}

impl GazeTelemetry {
    pub fn new(monster_gaze: f64, forest_gaze: f64) -> Self {
        Self {
            monster_gaze,
            forest_gaze,
        }
    }
}

/// Snapshot of every answer bucket collected during a session.
///
/// Every bucket is optional on the wire; partial sessions still score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputs {
    /// `"img{n}_q{m}"` → 0–10 rating.
    #[serde(default)]
    pub implicit_answers: BTreeMap<String, i32>,
    /// Zero-based item index → 1–5 Likert rating.
    #[serde(default)]
    pub explicit_answers: BTreeMap<String, i32>,
    /// Zero-based item index → 1–5 Likert rating.
    #[serde(default)]
    pub wellbeing_answers: BTreeMap<String, i32>,
    /// Reaction times in trial order, milliseconds.
    #[serde(default, alias = "iatAnswers")]
    pub iat_reaction_times: Vec<f64>,
    #[serde(
        default,
        alias = "stareData",
        skip_serializing_if = "Option::is_none"
    )]
    pub gaze_telemetry: Option<GazeTelemetry>,
}

impl RawInputs {
    pub fn implicit_key(image: usize, question: usize) -> String {
        format!("img{image}_q{question}")
    }

    /// Implicit rating, with missing entries counted as 0.
    pub fn implicit(&self, image: usize, question: usize) -> i32 {
        self.implicit_answers
            .get(&Self::implicit_key(image, question))
            .copied()
            .unwrap_or(0)
    }

    /// Explicit item on the internal 0–4 scale.
    pub fn explicit_item(&self, index: usize) -> f64 {
        likert_item(&self.explicit_answers, index)
    }

    /// Wellbeing item on the internal 0–4 scale.
    pub fn wellbeing_item(&self, index: usize) -> f64 {
        likert_item(&self.wellbeing_answers, index)
    }
}

/// A missing or zero rating is read as the scale floor (1), giving 0 internally.
fn likert_item(answers: &BTreeMap<String, i32>, index: usize) -> f64 {
    let rating = answers
        .get(&index.to_string())
        .copied()
        .filter(|value| *value != 0)
        .unwrap_or(1);
    f64::from(rating) - 1.0
}

/// Sixteen standardized-scale scores produced by the aggregator.
///
/// The values are linear remaps of fixed theoretical ranges onto roughly
/// [-2, +2], not population Z-scores. Older stored results spelled the keys
/// with a lowercase `z_` prefix; both spellings deserialize, the canonical
/// key wins when a record carries both, and missing or null keys read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, serde_json::Value>")]
pub struct ScoreVector {
    #[serde(rename = "Z_PSCI")]
    pub psci: f64,

    #[serde(rename = "Z_MDI_Ach")]
    pub mdi_achievement: f64,
    #[serde(rename = "Z_MDI_Pow")]
    pub mdi_power: f64,
    #[serde(rename = "Z_MDI_Aff")]
    pub mdi_affiliation: f64,

    #[serde(rename = "Z_iM_Ach")]
    pub implicit_achievement: f64,
    #[serde(rename = "Z_iM_Pow")]
    pub implicit_power: f64,
    #[serde(rename = "Z_iM_Aff")]
    pub implicit_affiliation: f64,

    #[serde(rename = "Z_eM_Ach")]
    pub explicit_achievement: f64,
    #[serde(rename = "Z_eM_Pow")]
    pub explicit_power: f64,
    #[serde(rename = "Z_eM_Aff")]
    pub explicit_affiliation: f64,

    #[serde(rename = "Z_N_Auto")]
    pub need_autonomy: f64,
    #[serde(rename = "Z_N_Comp")]
    pub need_competence: f64,
    #[serde(rename = "Z_N_Rela")]
    pub need_relatedness: f64,

    #[serde(rename = "Z_W_Wellbeing")]
    pub wellbeing: f64,
    #[serde(rename = "Z_C_Depletion")]
    pub depletion: f64,
    #[serde(rename = "Z_C_External")]
    pub external: f64,
}

impl ScoreVector {
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn implicit(&self, motive: Motive) -> f64 {
        match motive {
            Motive::Achievement => self.implicit_achievement,
            Motive::Power => self.implicit_power,
            Motive::Affiliation => self.implicit_affiliation,
        }
    }

    pub fn explicit(&self, motive: Motive) -> f64 {
        match motive {
            Motive::Achievement => self.explicit_achievement,
            Motive::Power => self.explicit_power,
            Motive::Affiliation => self.explicit_affiliation,
        }
    }

    pub fn discrepancy(&self, motive: Motive) -> f64 {
        match motive {
            Motive::Achievement => self.mdi_achievement,
            Motive::Power => self.mdi_power,
            Motive::Affiliation => self.mdi_affiliation,
        }
    }

    pub fn need(&self, need: Need) -> f64 {
        match need {
            Need::Autonomy => self.need_autonomy,
            Need::Competence => self.need_competence,
            Need::Relatedness => self.need_relatedness,
        }
    }

    /// Largest of the three motive discrepancies.
    pub fn max_discrepancy(&self) -> f64 {
        Motive::ordered()
            .into_iter()
            .map(|motive| self.discrepancy(motive))
            .fold(0.0, f64::max)
    }

    /// All sixteen fields with their canonical names, in declaration order.
    pub fn named_fields(&self) -> [(&'static str, f64); 16] {
        [
            ("Z_PSCI", self.psci),
            ("Z_MDI_Ach", self.mdi_achievement),
            ("Z_MDI_Pow", self.mdi_power),
            ("Z_MDI_Aff", self.mdi_affiliation),
            ("Z_iM_Ach", self.implicit_achievement),
            ("Z_iM_Pow", self.implicit_power),
            ("Z_iM_Aff", self.implicit_affiliation),
            ("Z_eM_Ach", self.explicit_achievement),
            ("Z_eM_Pow", self.explicit_power),
            ("Z_eM_Aff", self.explicit_affiliation),
            ("Z_N_Auto", self.need_autonomy),
            ("Z_N_Comp", self.need_competence),
            ("Z_N_Rela", self.need_relatedness),
            ("Z_W_Wellbeing", self.wellbeing),
            ("Z_C_Depletion", self.depletion),
            ("Z_C_External", self.external),
        ]
    }
}

impl TryFrom<BTreeMap<String, serde_json::Value>> for ScoreVector {
    type Error = String;

    fn try_from(record: BTreeMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let field = |name: &str| -> Result<f64, String> {
            let present = |key: &str| record.get(key).filter(|value| !value.is_null());
            let legacy = format!("z{}", &name[1..]);
            match present(name).or_else(|| present(&legacy)) {
                None => Ok(0.0),
                Some(value) => value
                    .as_f64()
                    .ok_or_else(|| format!("{name} must be a number, got {value}")),
            }
        };

        Ok(Self {
            psci: field("Z_PSCI")?,
            mdi_achievement: field("Z_MDI_Ach")?,
            mdi_power: field("Z_MDI_Pow")?,
            mdi_affiliation: field("Z_MDI_Aff")?,
            implicit_achievement: field("Z_iM_Ach")?,
            implicit_power: field("Z_iM_Pow")?,
            implicit_affiliation: field("Z_iM_Aff")?,
            explicit_achievement: field("Z_eM_Ach")?,
            explicit_power: field("Z_eM_Pow")?,
            explicit_affiliation: field("Z_eM_Aff")?,
            need_autonomy: field("Z_N_Auto")?,
            need_competence: field("Z_N_Comp")?,
            need_relatedness: field("Z_N_Rela")?,
            wellbeing: field("Z_W_Wellbeing")?,
            depletion: field("Z_C_Depletion")?,
            external: field("Z_C_External")?,
        })
    }
}
