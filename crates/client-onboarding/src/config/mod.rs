use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

use crate::intake::gateway::{Destination, DEFAULT_ONBOARD_URL, DEFAULT_SIMULATED_DELAY};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            gateway: GatewayConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where and how validated onboarding records are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub onboard_url: Url,
    /// `None` lets the destination host decide (placeholder hosts simulate).
    pub simulate: Option<bool>,
    pub simulated_delay: Duration,
}

impl GatewayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("ONBOARD_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ONBOARD_URL.to_string());
        let onboard_url =
            Url::parse(raw_url.trim()).map_err(|source| ConfigError::InvalidOnboardUrl {
                value: raw_url.clone(),
                source,
            })?;

        let simulate = match env::var("ONBOARD_SIMULATE") {
            Ok(value) if !value.trim().is_empty() => Some(parse_flag(&value)?),
            _ => None,
        };

        let simulated_delay = match env::var("ONBOARD_SIMULATED_DELAY_MS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidSimulatedDelay)?,
            Err(_) => DEFAULT_SIMULATED_DELAY,
        };

        Ok(Self {
            onboard_url,
            simulate,
            simulated_delay,
        })
    }

    pub fn destination(&self) -> Destination {
        Destination::resolve(self.onboard_url.clone(), self.simulate, self.simulated_delay)
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidSimulateFlag {
            value: value.to_string(),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidOnboardUrl { value: String, source: url::ParseError },
    InvalidSimulateFlag { value: String },
    InvalidSimulatedDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidOnboardUrl { value, .. } => {
                write!(f, "ONBOARD_URL '{}' is not an absolute URL", value)
            }
            ConfigError::InvalidSimulateFlag { value } => {
                write!(f, "ONBOARD_SIMULATE '{}' must be true or false", value)
            }
            ConfigError::InvalidSimulatedDelay => {
                write!(f, "ONBOARD_SIMULATED_DELAY_MS must be a whole number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidOnboardUrl { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSimulateFlag { .. }
            | ConfigError::InvalidSimulatedDelay => None,
        }
    }
}
