//! Forecast backend: async forecast fetching.
//! All network work runs off the caller's thread; results are sent via mpsc.

use std::sync::Arc;

use jma_weather::{ForecastResult, JmaProvider};

use super::request_token::RequestToken;

/// Error type for forecast service operations
#[derive(Debug)]
pub enum ForecastServiceError {
    /// Region directory could not be loaded.
    Regions(jma_weather::WeatherError),
    /// Selected code is not in the region directory.
    UnknownRegion(String),
    /// Async runtime could not be started.
    Runtime(String),
}

impl std::fmt::Display for ForecastServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastServiceError::Regions(e) => write!(f, "Region list error: {}", e),
            ForecastServiceError::UnknownRegion(code) => write!(f, "Unknown region: {}", code),
            ForecastServiceError::Runtime(s) => write!(f, "Runtime error: {}", s),
        }
    }
}

impl std::error::Error for ForecastServiceError {}

/// Messages sent from async operations back to the caller's thread
#[derive(Debug)]
pub enum ForecastServiceMessage {
    /// Result of fetching a forecast. Always carries a displayable result.
    FetchDone {
        token: RequestToken,
        region_code: String,
        result: ForecastResult,
    },
}

/// Request a forecast asynchronously.
/// Sends `FetchDone` tagged with `token` on the channel when complete.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<ForecastServiceMessage>,
    runtime: &tokio::runtime::Handle,
    provider: Arc<JmaProvider>,
    token: RequestToken,
    region_code: String,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        tracing::debug!("Fetching forecast for {} (request {})", region_code, token.value());
        let result = provider.fetch_forecast(&region_code).await;
        let _ = tx.send(ForecastServiceMessage::FetchDone {
            token,
            region_code,
            result,
        });
    });
}
