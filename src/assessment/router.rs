use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{RawInputs, ScoreVector};
use super::report::AssessmentReport;
use super::service::{AssessmentResult, AssessmentService};
use crate::error::AppError;

/// Router builder exposing the scoring pipeline over HTTP.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/assessments/score", post(score_handler))
        .route("/api/v1/assessments/classify", post(classify_handler))
        .with_state(service)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(flatten)]
    pub answers: RawInputs,
    #[serde(default)]
    pub explicit_goal: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub result: AssessmentResult,
    pub report: AssessmentReport,
}

pub(crate) async fn score_handler(
    State(service): State<Arc<AssessmentService>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let result = service.assess(request.answers, request.explicit_goal);
    let report = AssessmentReport::build(&result);
    Ok((StatusCode::OK, Json(ScoreResponse { result, report })))
}

pub(crate) async fn classify_handler(
    State(service): State<Arc<AssessmentService>>,
    payload: Result<Json<ScoreVector>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(scores) = payload?;
    Ok((StatusCode::OK, Json(service.classify(&scores))))
}
