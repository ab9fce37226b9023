use serde::{Deserialize, Serialize};

/// Thresholds on the standardized scale used by the profile decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Wellbeing at or below this counts as low.
    pub low_wellbeing: f64,
    /// Wellbeing at or above this counts as high.
    pub high_wellbeing: f64,
    /// Depletion at or above this counts as high.
    pub high_depletion: f64,
    /// Largest discrepancy must stay below this for an integrated profile.
    pub integrated_max_discrepancy: f64,
    pub moderate_discrepancy: f64,
    pub high_discrepancy: f64,
    pub moderate_psci: f64,
    pub high_psci: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            low_wellbeing: -0.5,
            high_wellbeing: 0.5,
            high_depletion: 0.5,
            integrated_max_discrepancy: 1.0,
            moderate_discrepancy: 1.0,
            high_discrepancy: 1.5,
            moderate_psci: 0.5,
            high_psci: 1.0,
        }
    }
}
