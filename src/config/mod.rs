use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::assessment::ClassifierConfig;

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
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("PAIMA_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("PAIMA_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PAIMA_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("PAIMA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            classifier: load_classifier_config()?,
        })
    }
}

/// Classifier thresholds may be tuned per deployment; unset variables keep the defaults.
fn load_classifier_config() -> Result<ClassifierConfig, ConfigError> {
    let defaults = ClassifierConfig::default();

    Ok(ClassifierConfig {
        low_wellbeing: threshold("PAIMA_LOW_WELLBEING", defaults.low_wellbeing)?,
        high_wellbeing: threshold("PAIMA_HIGH_WELLBEING", defaults.high_wellbeing)?,
        high_depletion: threshold("PAIMA_HIGH_DEPLETION", defaults.high_depletion)?,
        integrated_max_discrepancy: threshold(
            "PAIMA_INTEGRATED_MAX_DISCREPANCY",
            defaults.integrated_max_discrepancy,
        )?,
        moderate_discrepancy: threshold(
            "PAIMA_MODERATE_DISCREPANCY",
            defaults.moderate_discrepancy,
        )?,
        high_discrepancy: threshold("PAIMA_HIGH_DISCREPANCY", defaults.high_discrepancy)?,
        moderate_psci: threshold("PAIMA_MODERATE_PSCI", defaults.moderate_psci)?,
        high_psci: threshold("PAIMA_HIGH_PSCI", defaults.high_psci)?,
    })
}

fn threshold(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidThreshold { key, value: raw }),
        Err(_) => Ok(default),
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PAIMA_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "PAIMA_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { key, value } => {
                write!(f, "{key} must be a finite number, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
