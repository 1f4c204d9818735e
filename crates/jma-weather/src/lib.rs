//! JMA forecast client
//!
//! Fetches the Japan Meteorological Agency area directory and per-region
//! forecasts, and reduces forecast payloads to three display-ready days.

pub mod extract;
pub mod provider;
pub mod schema;
pub mod types;

pub use extract::{extract_forecast, parse_days};
pub use provider::{
    JmaProvider, ProviderConfig, AREA_LIST_URL, CODE_PLACEHOLDER, DEFAULT_TIMEOUT_SECS,
    FORECAST_URL_TEMPLATE,
};
pub use schema::AreaSection;
pub use types::*;
