use std::time::Duration;

use axum::response::Response;
use chrono::{Days, Local, NaiveDate};
use reqwest::Url;
use serde_json::Value;

use crate::intake::domain::{BudgetInput, CandidateRecord};
use crate::intake::gateway::{Destination, SubmissionGateway};
use crate::intake::service::OnboardingService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

pub(super) fn candidate() -> CandidateRecord {
    CandidateRecord {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@analytical-engines.co.uk".to_string(),
        company_name: "Analytical Engines Ltd".to_string(),
        services: vec!["UI/UX".to_string(), "Web Dev".to_string()],
        budget_usd: Some(BudgetInput::from("50000")),
        project_start_date: "2025-04-01".to_string(),
        accept_terms: true,
    }
}

/// Candidate whose start date stays in the future relative to the wall clock.
pub(super) fn live_candidate() -> CandidateRecord {
    let start = Local::now()
        .date_naive()
        .checked_add_days(Days::new(14))
        .expect("valid start date");
    CandidateRecord {
        project_start_date: start.format("%Y-%m-%d").to_string(),
        ..candidate()
    }
}

pub(super) fn simulated_service() -> OnboardingService {
    let gateway = SubmissionGateway::new(Destination::Simulated {
        delay: Duration::ZERO,
    })
    .expect("client builds");
    OnboardingService::new(gateway)
}

/// Service whose gateway would fail loudly if it were ever reached.
pub(super) fn unreachable_service() -> OnboardingService {
    let url = Url::parse("http://127.0.0.1:1/api/onboard").expect("valid url");
    let gateway = SubmissionGateway::new(Destination::Remote(url)).expect("client builds");
    OnboardingService::new(gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
