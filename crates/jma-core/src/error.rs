//! Errors reported to the person running the forecast viewer.
//!
//! Library crates keep their own error types; the UI layer maps them into
//! [`AppError`], and `user_message()` is what ends up on screen.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Reading selections or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The async runtime or HTTP client could not be built.
    #[error("Startup error: {0}")]
    Startup(String),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Forecast(e) => e.user_message(),
            AppError::Io(_) => "Could not read the selection or write the forecast.",
            AppError::Startup(_) => "The forecast viewer could not start. Please try again.",
        }
    }
}

/// Failures talking to the JMA area directory.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("{endpoint} returned status {status}")]
    ServerError { status: u16, endpoint: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Could not reach the JMA servers. Check your internet connection."
            }
            NetworkError::Timeout => "JMA did not answer in time. Try again or raise jma.timeout_secs.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The JMA servers are having trouble. Please try again later."
            }
            NetworkError::ServerError { .. } => "JMA rejected the request. Check jma.area_url.",
            NetworkError::InvalidResponse(_) => "The JMA region list could not be read.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "The config file has invalid settings.",
            ConfigError::ParseError(_) => "The config file could not be read as TOML.",
        }
    }
}

/// Problems with a selection or its forecast.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Unknown region code: {0}")]
    UnknownRegion(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    /// No fetch completed within the response window.
    #[error("No forecast response")]
    NoResponse,
}

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::UnknownRegion(_) => "Unknown region code. Pick one from the list.",
            ForecastError::Upstream(_) => "The JMA service returned an error. Please try again.",
            ForecastError::NoResponse => "No forecast arrived in time. Please try again.",
        }
    }
}
