//! Centralized service container for the forecast front end.
//!
//! Owns the tokio runtime, the JMA provider, the request tracker, and the
//! channel that carries completed fetches back to the caller's thread.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use jma_core::{AppError, Config};
use jma_weather::{JmaProvider, ProviderConfig, Region};
use parking_lot::Mutex;

use crate::services::{
    request_forecast_fetch, ForecastServiceError, ForecastServiceMessage, RequestToken,
    RequestTracker,
};

/// Translate the application config into provider settings.
pub fn provider_config(config: &Config) -> ProviderConfig {
    ProviderConfig {
        area_url: config.jma.area_url.clone(),
        forecast_url_template: config.jma.forecast_url_template.clone(),
        area_section: config.jma.area_section,
        timeout: Duration::from_secs(config.jma.timeout_secs),
    }
}

pub struct AppServices {
    runtime: tokio::runtime::Runtime,
    provider: Arc<JmaProvider>,
    tracker: Arc<RequestTracker>,
    forecast_tx: Sender<ForecastServiceMessage>,
    forecast_rx: Mutex<Receiver<ForecastServiceMessage>>,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("provider", &self.provider)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl AppServices {
    /// Start the runtime and build the provider.
    ///
    /// Must be called from outside any tokio runtime.
    pub fn init(config: &Config) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("jma-tokio")
            .build()
            .map_err(|e| ForecastServiceError::Runtime(e.to_string()))?;

        let provider = JmaProvider::new(provider_config(config))
            .map_err(ForecastServiceError::Regions)?;

        let (forecast_tx, forecast_rx) = std::sync::mpsc::channel();

        Ok(Self {
            runtime,
            provider: Arc::new(provider),
            tracker: Arc::new(RequestTracker::new()),
            forecast_tx,
            forecast_rx: Mutex::new(forecast_rx),
        })
    }

    pub fn tracker(&self) -> Arc<RequestTracker> {
        self.tracker.clone()
    }

    /// Load the region directory, blocking until it arrives.
    pub fn load_regions(&self) -> Result<Vec<Region>, AppError> {
        self.runtime
            .block_on(self.provider.fetch_regions())
            .map_err(|e| ForecastServiceError::Regions(e).into())
    }

    /// Issue a forecast request for `region_code` and return its token.
    pub fn select(&self, region_code: &str) -> RequestToken {
        let token = self.tracker.issue();
        request_forecast_fetch(
            &self.forecast_tx,
            self.runtime.handle(),
            self.provider.clone(),
            token,
            region_code.to_string(),
        );
        token
    }

    /// Wait up to `timeout` for the next completed fetch.
    pub fn recv(&self, timeout: Duration) -> Option<ForecastServiceMessage> {
        match self.forecast_rx.lock().recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!("No forecast response within {:?}", timeout);
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop the runtime without waiting for in-flight requests.
    pub fn shutdown(self) {
        tracing::info!("AppServices shutdown initiated");
        self.runtime.shutdown_background();
        tracing::info!("AppServices shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jma_weather::AreaSection;

    #[test]
    fn provider_config_follows_app_config() {
        let mut config = Config::default();
        config.jma.area_section = AreaSection::Centers;
        config.jma.timeout_secs = 7;

        let provider = provider_config(&config);
        assert_eq!(provider.area_section, AreaSection::Centers);
        assert_eq!(provider.timeout, Duration::from_secs(7));
        assert_eq!(provider.area_url, config.jma.area_url);
        assert_eq!(provider.forecast_url_template, config.jma.forecast_url_template);
    }

    #[test]
    fn recv_times_out_before_any_request() {
        let services = AppServices::init(&Config::default()).unwrap();
        assert!(services.recv(Duration::from_millis(20)).is_none());
        services.shutdown();
    }
}
