//! Motive assessment scoring, profiling and the session boundary around them.

pub mod domain;
pub mod iat;
pub mod profile;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{GazeTelemetry, Motive, Need, RawInputs, ScoreVector};
pub use iat::{
    d_score, IatBias, IatBlock, IatBlockKind, IatBlockLayout, IatImportError, IatSummary,
    IatTrial, IatTrialImporter,
};
pub use profile::{
    classify_profile, ClassifierConfig, ConflictTier, ProfileClassifier, ProfileKey,
    ProfileOutcome, RankedDimension, WellbeingTier,
};
pub use report::{AssessmentReport, Interpretation};
pub use router::assessment_router;
pub use scoring::{compute_scores, map_to_z, QuestionnaireSchema, ScoreAggregator, ScoreBreakdown};
pub use service::{AssessmentResult, AssessmentService};
pub use session::{
    AssessmentSession, AssessmentStage, GazeTarget, IatStageResult, SessionError, StageSubmission,
};
