use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::extract::extract_forecast;
use crate::schema::{AreaDirectory, AreaSection};
use crate::types::{FetchFailure, ForecastResult, NetworkFailure, Region, WeatherError};

pub const AREA_LIST_URL: &str = "http://www.jma.go.jp/bosai/common/const/area.json";
pub const FORECAST_URL_TEMPLATE: &str =
    "https://www.jma.go.jp/bosai/forecast/data/forecast/{code}.json";

/// Placeholder replaced by the region code in the forecast URL template.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("jma-forecast/", env!("CARGO_PKG_VERSION"));

/// Endpoints and client settings for [`JmaProvider`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub area_url: String,
    pub forecast_url_template: String,
    pub area_section: AreaSection,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            area_url: AREA_LIST_URL.to_string(),
            forecast_url_template: FORECAST_URL_TEMPLATE.to_string(),
            area_section: AreaSection::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for the JMA area directory and forecast endpoints.
///
/// Stateless apart from the pooled HTTP client; every call issues exactly one
/// request and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct JmaProvider {
    client: Arc<Client>,
    config: ProviderConfig,
}

impl JmaProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::Client(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn forecast_url(&self, region_code: &str) -> String {
        self.config
            .forecast_url_template
            .replace(CODE_PLACEHOLDER, region_code)
    }

    /// Fetch the selectable regions from the area directory.
    ///
    /// Transport failures and non-success statuses are returned as
    /// [`WeatherError::Network`]; there is no retry.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_regions(&self) -> Result<Vec<Region>, WeatherError> {
        let response = self
            .client
            .get(&self.config.area_url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let directory: AreaDirectory = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("area directory: {}", e)))?;

        let regions = directory.into_regions(self.config.area_section)?;
        tracing::info!("Loaded {} regions", regions.len());
        Ok(regions)
    }

    /// Fetch and extract the forecast for one region.
    ///
    /// Never fails: request errors resolve to the fetch-error sentinel and
    /// unreadable bodies to the parse-error sentinel.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, region_code: &str) -> ForecastResult {
        let url = self.forecast_url(region_code);

        let body = match self.get_body(&url).await {
            Ok(body) => body,
            Err(failure) => {
                tracing::warn!("Forecast fetch error: {}", failure);
                return ForecastResult::sentinel(failure);
            }
        };

        extract_forecast(&body)
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(NetworkFailure::from(e).to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))
    }
}
