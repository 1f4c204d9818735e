pub mod forecast_service;
pub mod request_token;

pub use forecast_service::{
    request_fetch as request_forecast_fetch, ForecastServiceError, ForecastServiceMessage,
};
pub use request_token::{RequestToken, RequestTracker};
