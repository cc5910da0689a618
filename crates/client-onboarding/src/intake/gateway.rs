use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::domain::OnboardingRecord;
use crate::config::GatewayConfig;

pub const DEFAULT_ONBOARD_URL: &str = "https://example.com/api/onboard";
pub const PLACEHOLDER_HOST: &str = "example.com";
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1000);

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";
pub const SIMULATED_SUCCESS_MESSAGE: &str = "Form submitted successfully! (Simulated)";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to submit the form. Please check your data and try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "A network error occurred. Please check your internet connection.";

/// Where validated records are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// No network exchange; resolves to a synthetic success after `delay`.
    Simulated { delay: Duration },
    Remote(Url),
}

impl Destination {
    /// An explicit `simulate` flag wins; otherwise placeholder hosts simulate.
    pub fn resolve(url: Url, simulate: Option<bool>, delay: Duration) -> Self {
        let simulated = simulate.unwrap_or_else(|| is_placeholder(&url));
        if simulated {
            Self::Simulated { delay }
        } else {
            Self::Remote(url)
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated { .. })
    }
}

/// True for `example.com` and any of its subdomains.
pub fn is_placeholder(url: &Url) -> bool {
    url.host_str().is_some_and(|host| {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        host == PLACEHOLDER_HOST || host.ends_with(&format!(".{PLACEHOLDER_HOST}"))
    })
}

/// Milliseconds for log fields, saturating instead of truncating.
fn whole_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Caller-facing result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub message: String,
}

impl SubmissionOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Successful delivery, distinguishing the simulated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionReceipt {
    Simulated,
    Delivered { status: StatusCode },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("onboarding endpoint rejected submission ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("onboarding endpoint rejected submission ({status}) without a message")]
    RejectedWithoutMessage { status: StatusCode },
    #[error("onboarding endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),
}

impl SubmissionError {
    /// Message suitable for the error banner.
    pub fn user_message(&self) -> &str {
        match self {
            SubmissionError::Rejected { message, .. } => message,
            SubmissionError::RejectedWithoutMessage { .. } => GENERIC_FAILURE_MESSAGE,
            SubmissionError::Transport(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

impl From<Result<SubmissionReceipt, SubmissionError>> for SubmissionOutcome {
    fn from(result: Result<SubmissionReceipt, SubmissionError>) -> Self {
        match result {
            Ok(SubmissionReceipt::Simulated) => Self::succeeded(SIMULATED_SUCCESS_MESSAGE),
            Ok(SubmissionReceipt::Delivered { .. }) => Self::succeeded(SUCCESS_MESSAGE),
            Err(err) => Self::failed(err.user_message()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Delivers validated records to the onboarding endpoint with a single POST.
///
/// Holds no mutable state; clone or share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SubmissionGateway {
    client: Client,
    destination: Destination,
}

impl SubmissionGateway {
    pub fn new(destination: Destination) -> Result<Self, GatewayError> {
        let client = Client::builder().build().map_err(GatewayError::Client)?;
        Ok(Self::with_client(client, destination))
    }

    pub fn with_client(client: Client, destination: Destination) -> Self {
        Self {
            client,
            destination,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Self::new(config.destination())
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Submits and flattens the result into a `{success, message}` outcome.
    pub async fn submit(&self, record: &OnboardingRecord) -> SubmissionOutcome {
        let result = self.try_submit(record).await;
        match &result {
            Ok(SubmissionReceipt::Delivered { status }) => {
                info!(%status, "onboarding submission delivered");
            }
            Ok(SubmissionReceipt::Simulated) => {}
            Err(err @ SubmissionError::Transport(_)) => {
                error!(error = %err, "onboarding submission failed");
            }
            Err(err) => {
                warn!(error = %err, "onboarding submission rejected");
            }
        }
        SubmissionOutcome::from(result)
    }

    pub async fn try_submit(
        &self,
        record: &OnboardingRecord,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let url = match &self.destination {
            Destination::Simulated { delay } => {
                info!(
                    delay_ms = whole_millis(*delay),
                    services = record.services().len(),
                    "placeholder destination; simulating onboarding submission"
                );
                tokio::time::sleep(*delay).await;
                return Ok(SubmissionReceipt::Simulated);
            }
            Destination::Remote(url) => url.clone(),
        };

        let response = self
            .client
            .post(url)
            .json(record)
            .send()
            .await
            .map_err(SubmissionError::Transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(SubmissionReceipt::Delivered { status });
        }

        let message = response
            .json::<RemoteErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty());

        match message {
            Some(message) => Err(SubmissionError::Rejected { status, message }),
            None => Err(SubmissionError::RejectedWithoutMessage { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[test]
    fn delay_millis_saturate() {
        assert_eq!(whole_millis(DEFAULT_SIMULATED_DELAY), 1000);
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn placeholder_matches_host_not_substring() {
        assert!(is_placeholder(&url(DEFAULT_ONBOARD_URL)));
        assert!(is_placeholder(&url("https://api.EXAMPLE.com/onboard")));
        assert!(!is_placeholder(&url("https://notexample.com/onboard")));
        assert!(!is_placeholder(&url(
            "https://intake.agency.io/example.com/onboard"
        )));
    }

    #[test]
    fn explicit_flag_overrides_placeholder_detection() {
        let delay = Duration::from_millis(5);
        assert_eq!(
            Destination::resolve(url(DEFAULT_ONBOARD_URL), Some(false), delay),
            Destination::Remote(url(DEFAULT_ONBOARD_URL))
        );
        assert!(
            Destination::resolve(url("https://intake.agency.io/onboard"), Some(true), delay)
                .is_simulated()
        );
        assert!(Destination::resolve(url(DEFAULT_ONBOARD_URL), None, delay).is_simulated());
    }

    #[test]
    fn error_messages_follow_failure_kind() {
        let rejected = SubmissionError::Rejected {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(
            SubmissionOutcome::from(Err::<SubmissionReceipt, _>(rejected)),
            SubmissionOutcome::failed("quota exceeded")
        );

        let bare = SubmissionError::RejectedWithoutMessage {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(bare.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
