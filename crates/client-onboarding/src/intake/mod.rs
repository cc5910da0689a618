//! Client onboarding intake: field validation, submission, and HTTP endpoints.
//!
//! Candidates arrive as loosely typed form payloads, are checked field by field,
//! and only a fully valid [`OnboardingRecord`] ever reaches the gateway.

pub mod domain;
pub mod gateway;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{BudgetInput, CandidateRecord, Field, OnboardingRecord, ServiceOption};
pub use gateway::{
    Destination, GatewayError, SubmissionError, SubmissionGateway, SubmissionOutcome,
    SubmissionReceipt,
};
pub use router::onboarding_router;
pub use service::{IntakeResult, IntakeView, OnboardingService};
pub use validation::{validate, validate_on, FieldError, FieldErrors};
