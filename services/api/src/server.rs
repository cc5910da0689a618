use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_onboarding_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use client_onboarding::config::AppConfig;
use client_onboarding::error::AppError;
use client_onboarding::intake::{OnboardingService, SubmissionGateway};
use client_onboarding::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let gateway = SubmissionGateway::from_config(&config.gateway)?;
    if gateway.destination().is_simulated() {
        warn!(
            onboard_url = %config.gateway.onboard_url,
            "onboarding submissions are simulated; set ONBOARD_URL to a live endpoint"
        );
    }
    let onboarding_service = Arc::new(OnboardingService::new(gateway));

    let app = with_onboarding_routes(onboarding_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "client onboarding intake ready");

    axum::serve(listener, app).await?;
    Ok(())
}
