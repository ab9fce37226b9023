use metrics_exporter_prometheus::PrometheusHandle;
use paima::assessment::{AssessmentService, ClassifierConfig};
use paima::config::AppConfig;
use paima::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn assessment_service(config: &ClassifierConfig) -> AssessmentService {
    AssessmentService::with_classifier_config(config.clone())
}

/// Classifier thresholds for one-shot commands, with the same environment
/// overrides the server honors.
pub(crate) fn classifier_config() -> Result<ClassifierConfig, AppError> {
    Ok(AppConfig::load()?.classifier)
}
