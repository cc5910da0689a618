use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{CandidateRecord, ServiceOption};
use super::service::{IntakeResult, OnboardingService};
use crate::error::AppError;

/// Router builder exposing the onboarding intake endpoints.
pub fn onboarding_router(service: Arc<OnboardingService>) -> Router {
    Router::new()
        .route("/api/v1/onboarding", post(submit_handler))
        .route("/api/v1/onboarding/validate", post(validate_handler))
        .route("/api/v1/onboarding/services", get(services_handler))
        .with_state(service)
}

pub(crate) async fn services_handler() -> Json<serde_json::Value> {
    let labels: Vec<&str> = ServiceOption::ALL
        .into_iter()
        .map(ServiceOption::label)
        .collect();
    Json(json!({ "services": labels }))
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<OnboardingService>>,
    payload: Result<Json<CandidateRecord>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(candidate) = payload?;
    let record = service.validate(&candidate)?;
    Ok(Json(json!({ "valid": true, "record": record })))
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<OnboardingService>>,
    payload: Result<Json<CandidateRecord>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(candidate) = payload?;
    let result = service.process(&candidate).await;
    let status = match &result {
        IntakeResult::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        IntakeResult::Submitted(outcome) if outcome.success => StatusCode::OK,
        IntakeResult::Submitted(_) => StatusCode::BAD_GATEWAY,
    };
    Ok((status, Json(result.view())).into_response())
}
