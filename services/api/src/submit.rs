use chrono::{Local, NaiveDate};
use clap::Args;
use client_onboarding::config::AppConfig;
use client_onboarding::error::AppError;
use client_onboarding::intake::{
    CandidateRecord, IntakeResult, OnboardingService, SubmissionGateway,
};
use client_onboarding::telemetry;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Candidate JSON file, or `-` to read from stdin
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Validate only; never contact the onboarding endpoint
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// Reference date for the start-date rule (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = OnboardingService::new(SubmissionGateway::from_config(&config.gateway)?);
    submit_with(&service, args).await
}

/// Reads, validates and (unless `dry_run`) submits one candidate.
/// Validation or delivery failure is an error so the process exits non-zero.
async fn submit_with(service: &OnboardingService, args: SubmitArgs) -> Result<(), AppError> {
    let SubmitArgs {
        file,
        dry_run,
        today,
    } = args;

    let candidate = decode_candidate(&read_candidate(&file).await?)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    if dry_run {
        info!(%today, "validating onboarding candidate without submitting");
        return match service.validate_on(&candidate, today) {
            Ok(record) => print_json(&json!({ "valid": true, "record": record })),
            Err(errors) => {
                print_json(&json!({ "valid": false, "errors": &errors }))?;
                Err(errors.into())
            }
        };
    }

    let result = service.process_on(&candidate, today).await;
    print_json(&result.view())?;

    match result {
        IntakeResult::Rejected(errors) => Err(errors.into()),
        IntakeResult::Submitted(outcome) if outcome.success => Ok(()),
        IntakeResult::Submitted(outcome) => Err(AppError::Submission(outcome.message)),
    }
}

async fn read_candidate(path: &Path) -> Result<String, AppError> {
    if path == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        return Ok(raw);
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

fn decode_candidate(raw: &str) -> Result<CandidateRecord, AppError> {
    Ok(serde_json::from_str(raw)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_onboarding::intake::Destination;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
    }

    fn candidate_file(name: &str, candidate: serde_json::Value) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "client-onboarding-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, candidate.to_string()).expect("write candidate file");
        path
    }

    fn valid_candidate() -> serde_json::Value {
        json!({
            "fullName": "Ada Lovelace",
            "email": "ada@analytical-engines.co.uk",
            "companyName": "Analytical Engines Ltd",
            "services": ["Branding"],
            "budgetUsd": "5000",
            "projectStartDate": "2025-04-01",
            "acceptTerms": true,
        })
    }

    fn args(file: PathBuf, dry_run: bool) -> SubmitArgs {
        SubmitArgs {
            file,
            dry_run,
            today: Some(today()),
        }
    }

    fn service(destination: Destination) -> OnboardingService {
        OnboardingService::new(SubmissionGateway::new(destination).expect("client builds"))
    }

    fn simulated() -> OnboardingService {
        service(Destination::Simulated {
            delay: Duration::ZERO,
        })
    }

    fn unreachable() -> OnboardingService {
        service(Destination::Remote(
            "http://127.0.0.1:1/api/onboard".parse().expect("valid url"),
        ))
    }

    #[tokio::test]
    async fn invalid_candidate_fails_with_field_errors() {
        let mut candidate = valid_candidate();
        candidate["acceptTerms"] = json!(false);
        let path = candidate_file("invalid", candidate);

        let result = submit_with(&simulated(), args(path.clone(), false)).await;
        std::fs::remove_file(&path).ok();

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(
                    errors.fields().collect::<Vec<_>>(),
                    vec![client_onboarding::intake::Field::AcceptTerms]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dry_run_validates_without_submitting() {
        let path = candidate_file("dry-run", valid_candidate());

        let result = submit_with(&unreachable(), args(path.clone(), true)).await;
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok(), "dry run failed: {result:?}");
    }

    #[tokio::test]
    async fn dry_run_still_reports_invalid_candidate() {
        let mut candidate = valid_candidate();
        candidate["services"] = json!([]);
        let path = candidate_file("dry-run-invalid", candidate);

        let result = submit_with(&simulated(), args(path.clone(), true)).await;
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn simulated_submission_succeeds() {
        let path = candidate_file("simulated", valid_candidate());

        let result = submit_with(&simulated(), args(path.clone(), false)).await;
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok(), "submission failed: {result:?}");
    }

    #[tokio::test]
    async fn failed_delivery_is_submission_error() {
        let path = candidate_file("unreachable", valid_candidate());

        let result = submit_with(&unreachable(), args(path.clone(), false)).await;
        std::fs::remove_file(&path).ok();

        match result {
            Err(AppError::Submission(message)) => assert_eq!(
                message,
                "A network error occurred. Please check your internet connection."
            ),
            other => panic!("expected submission error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("client-onboarding-does-not-exist.json");

        let result = submit_with(&simulated(), args(path, true)).await;

        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn decodes_partial_candidate() {
        let candidate =
            decode_candidate(r#"{ "fullName": "Ada Lovelace", "services": ["Branding"] }"#)
                .expect("decodes");
        assert_eq!(candidate.full_name, "Ada Lovelace");
        assert_eq!(candidate.services, vec!["Branding".to_string()]);
        assert!(!candidate.accept_terms);
    }

    #[test]
    fn malformed_candidate_is_input_error() {
        match decode_candidate("{ not json") {
            Err(AppError::Input(_)) => {}
            other => panic!("expected input error, got {other:?}"),
        }
    }
}
