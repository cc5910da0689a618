use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{CandidateRecord, OnboardingRecord};
use super::gateway::{SubmissionGateway, SubmissionOutcome};
use super::validation::{validate_on, FieldErrors};

pub const CORRECTION_MESSAGE: &str = "Please correct the highlighted fields.";

/// Result of running one candidate through the intake pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeResult {
    /// Validation failed; nothing was transmitted.
    Rejected(FieldErrors),
    Submitted(SubmissionOutcome),
}

impl IntakeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, IntakeResult::Submitted(outcome) if outcome.success)
    }

    pub fn view(&self) -> IntakeView<'_> {
        match self {
            IntakeResult::Rejected(errors) => IntakeView {
                success: false,
                message: CORRECTION_MESSAGE,
                errors: Some(errors),
            },
            IntakeResult::Submitted(outcome) => IntakeView {
                success: outcome.success,
                message: &outcome.message,
                errors: None,
            },
        }
    }
}

/// Wire shape for an intake result: the submission outcome, plus field
/// errors when validation rejected the candidate.
#[derive(Debug, Serialize)]
pub struct IntakeView<'a> {
    pub success: bool,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a FieldErrors>,
}

/// Validates candidates and forwards accepted records to the gateway.
#[derive(Debug, Clone)]
pub struct OnboardingService {
    gateway: Arc<SubmissionGateway>,
}

impl OnboardingService {
    pub fn new(gateway: SubmissionGateway) -> Self {
        Self::with_gateway(Arc::new(gateway))
    }

    pub fn with_gateway(gateway: Arc<SubmissionGateway>) -> Self {
        Self { gateway }
    }

    pub fn validate(&self, candidate: &CandidateRecord) -> Result<OnboardingRecord, FieldErrors> {
        self.validate_on(candidate, Local::now().date_naive())
    }

    pub fn validate_on(
        &self,
        candidate: &CandidateRecord,
        today: NaiveDate,
    ) -> Result<OnboardingRecord, FieldErrors> {
        let result = validate_on(candidate, today);
        if let Err(errors) = &result {
            debug!(invalid_fields = errors.len(), "onboarding candidate rejected");
        }
        result
    }

    pub async fn process(&self, candidate: &CandidateRecord) -> IntakeResult {
        self.process_on(candidate, Local::now().date_naive()).await
    }

    /// Validates against `today` and submits only when every field passes.
    pub async fn process_on(&self, candidate: &CandidateRecord, today: NaiveDate) -> IntakeResult {
        let record = match self.validate_on(candidate, today) {
            Ok(record) => record,
            Err(errors) => return IntakeResult::Rejected(errors),
        };

        let outcome = self.gateway.submit(&record).await;
        info!(success = outcome.success, "onboarding intake processed");
        IntakeResult::Submitted(outcome)
    }
}
