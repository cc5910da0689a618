use super::common::*;

use crate::intake::domain::Field;
use crate::intake::gateway::SIMULATED_SUCCESS_MESSAGE;
use crate::intake::service::{IntakeResult, CORRECTION_MESSAGE};

#[tokio::test]
async fn valid_candidate_is_submitted() {
    let service = simulated_service();

    let result = service.process_on(&candidate(), today()).await;

    match &result {
        IntakeResult::Submitted(outcome) => {
            assert!(outcome.success);
            assert_eq!(outcome.message, SIMULATED_SUCCESS_MESSAGE);
        }
        other => panic!("expected submission, got {other:?}"),
    }
    assert!(result.is_success());
}

#[tokio::test]
async fn invalid_candidate_never_reaches_gateway() {
    let service = unreachable_service();
    let mut candidate = candidate();
    candidate.company_name = "X".to_string();

    let result = service.process_on(&candidate, today()).await;

    match &result {
        IntakeResult::Rejected(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.message(Field::CompanyName).as_deref(),
                Some("Company name must be at least 2 characters.")
            );
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(!result.is_success());
}

#[tokio::test]
async fn unreachable_gateway_surfaces_network_error() {
    let service = unreachable_service();

    let result = service.process_on(&candidate(), today()).await;

    match result {
        IntakeResult::Submitted(outcome) => {
            assert!(!outcome.success);
            assert_eq!(
                outcome.message,
                "A network error occurred. Please check your internet connection."
            );
        }
        other => panic!("expected failed submission, got {other:?}"),
    }
}

#[test]
fn rejected_view_carries_field_errors() {
    let service = simulated_service();
    let mut candidate = candidate();
    candidate.email = String::new();
    let errors = service
        .validate_on(&candidate, today())
        .expect_err("email missing");

    let result = IntakeResult::Rejected(errors);
    let view = serde_json::to_value(result.view()).expect("serializes");

    assert_eq!(view["success"], false);
    assert_eq!(view["message"], CORRECTION_MESSAGE);
    assert_eq!(view["errors"]["email"], "Invalid email address.");
}
