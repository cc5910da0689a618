mod cli;
mod infra;
mod routes;
mod server;
mod submit;

use client_onboarding::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
