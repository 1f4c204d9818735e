use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Placeholder shown wherever a value could not be obtained.
pub const NOT_AVAILABLE: &str = "N/A";

/// Weather label of the sentinel day when the forecast request failed.
pub const FETCH_ERROR_LABEL: &str = "取得エラー";

/// Weather label of the sentinel day when the forecast payload could not be read.
pub const PARSE_ERROR_LABEL: &str = "データ取得エラー";

/// Number of days kept from the upstream date series.
pub const FORECAST_DAYS: usize = 3;

/// A JMA forecasting area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

/// Calendar date of a forecast day, or `N/A` on sentinel entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastDate {
    Day(NaiveDate),
    Unavailable,
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unavailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for ForecastDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One day of a forecast.
///
/// Temperatures are the raw upstream tokens (JMA sends them as strings and
/// sometimes as empty strings). `None` means the series had no value for this
/// day and is shown as `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastDay {
    pub date: ForecastDate,
    pub weather: String,
    #[serde(rename = "tempMax", serialize_with = "serialize_reading")]
    pub temp_max: Option<String>,
    #[serde(rename = "tempMin", serialize_with = "serialize_reading")]
    pub temp_min: Option<String>,
}

fn serialize_reading<S: Serializer>(
    reading: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(reading.as_deref().unwrap_or(NOT_AVAILABLE))
}

impl ForecastDay {
    fn sentinel(label: &str) -> Self {
        Self {
            date: ForecastDate::Unavailable,
            weather: label.to_string(),
            temp_max: None,
            temp_min: None,
        }
    }

    pub fn temp_max_label(&self) -> &str {
        self.temp_max.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn temp_min_label(&self) -> &str {
        self.temp_min.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Forecast request failed before a body could be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("Forecast endpoint returned status {0}")]
    Status(u16),
    #[error("Forecast request failed: {0}")]
    Transport(String),
}

/// Forecast body did not have the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    #[error("Invalid forecast JSON: {0}")]
    InvalidJson(String),
    #[error("Forecast payload has no editions")]
    NoEditions,
    #[error("First edition has no time series")]
    NoTimeSeries,
    #[error("First time series has no areas")]
    NoAreas,
    #[error("First area has no weather series")]
    MissingWeathers,
    #[error("First time series has no date series")]
    MissingTimeDefines,
    #[error("Date series has {0} entries, need 3")]
    DateSeriesTooShort(usize),
    #[error("Weather series has {0} entries, need 3")]
    WeatherSeriesTooShort(usize),
    #[error("Edition {0} has no time series")]
    EditionWithoutTimeSeries(usize),
    #[error("Block {block} of edition {edition} has no areas")]
    BlockWithoutAreas { edition: usize, block: usize },
    #[error("Invalid timestamp {0:?}")]
    InvalidTimestamp(String),
}

/// Why a forecast result is a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForecastFailure {
    #[error(transparent)]
    Fetch(#[from] FetchFailure),
    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

impl ForecastFailure {
    /// Weather text shown on the sentinel day.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fetch(_) => FETCH_ERROR_LABEL,
            Self::Parse(_) => PARSE_ERROR_LABEL,
        }
    }
}

/// Outcome of a forecast lookup.
///
/// Never empty: a success holds exactly [`FORECAST_DAYS`] days, a failure holds
/// one sentinel day whose weather text names the failure kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastResult {
    days: Vec<ForecastDay>,
    failure: Option<ForecastFailure>,
}

impl ForecastResult {
    pub fn from_days(days: [ForecastDay; FORECAST_DAYS]) -> Self {
        Self {
            days: days.into(),
            failure: None,
        }
    }

    pub fn sentinel(failure: impl Into<ForecastFailure>) -> Self {
        let failure = failure.into();
        Self {
            days: vec![ForecastDay::sentinel(failure.label())],
            failure: Some(failure),
        }
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    pub fn failure(&self) -> Option<&ForecastFailure> {
        self.failure.as_ref()
    }

    pub fn is_sentinel(&self) -> bool {
        self.failure.is_some()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Serialize for ForecastResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

/// Why the region request failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkFailure {
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Server returned status {0}")]
    Status(u16),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for NetworkFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Other(e.to_string())
        }
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkFailure),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into())
    }
}
