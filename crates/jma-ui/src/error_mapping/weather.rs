use crate::services::ForecastServiceError;
use jma_core::{AppError, ForecastError, NetworkError};
use jma_weather::{NetworkFailure, WeatherError};

impl From<ForecastServiceError> for AppError {
    fn from(e: ForecastServiceError) -> Self {
        match e {
            ForecastServiceError::Regions(inner) => match inner {
                WeatherError::Network(NetworkFailure::Timeout) => {
                    AppError::Network(NetworkError::Timeout)
                }
                WeatherError::Network(NetworkFailure::Connect(s)) => {
                    AppError::Network(NetworkError::ConnectionFailed(s))
                }
                WeatherError::Network(NetworkFailure::Status(status)) => {
                    AppError::Network(NetworkError::ServerError {
                        status,
                        endpoint: "area directory".to_string(),
                    })
                }
                WeatherError::Network(NetworkFailure::Other(s)) => {
                    AppError::Forecast(ForecastError::Upstream(s))
                }
                WeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
                WeatherError::Client(s) => {
                    tracing::error!("HTTP client unavailable: {}", s);
                    AppError::Startup(s)
                }
            },
            ForecastServiceError::UnknownRegion(code) => {
                AppError::Forecast(ForecastError::UnknownRegion(code))
            }
            ForecastServiceError::Runtime(s) => AppError::Startup(s),
        }
    }
}
