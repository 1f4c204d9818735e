//! Reduces a JMA forecast payload to a short list of per-day summaries.

use chrono::{DateTime, NaiveDate};

use crate::schema::{Edition, TimeSeries};
use crate::types::{ForecastDate, ForecastDay, ForecastResult, ParseFailure, FORECAST_DAYS};

/// Extract the first three forecast days from a forecast body.
///
/// Never fails: a body that cannot be read resolves to the parse-error
/// sentinel.
pub fn extract_forecast(body: &str) -> ForecastResult {
    match parse_days(body) {
        Ok(days) => ForecastResult::from_days(days),
        Err(failure) => {
            tracing::warn!("Forecast data error: {}", failure);
            ForecastResult::sentinel(failure)
        }
    }
}

/// Like [`extract_forecast`] but reports the exact reason extraction stopped.
pub fn parse_days(body: &str) -> Result<[ForecastDay; FORECAST_DAYS], ParseFailure> {
    let editions: Vec<Edition> =
        serde_json::from_str(body).map_err(|e| ParseFailure::InvalidJson(e.to_string()))?;
    days_from_editions(&editions)
}

pub fn days_from_editions(
    editions: &[Edition],
) -> Result<[ForecastDay; FORECAST_DAYS], ParseFailure> {
    let first_block = editions
        .first()
        .ok_or(ParseFailure::NoEditions)?
        .time_series
        .as_deref()
        .and_then(<[TimeSeries]>::first)
        .ok_or(ParseFailure::NoTimeSeries)?;

    let area = first_block.first_area().ok_or(ParseFailure::NoAreas)?;
    let date_series = first_block
        .time_defines
        .as_deref()
        .ok_or(ParseFailure::MissingTimeDefines)?;
    let weather_series = area
        .weathers
        .as_deref()
        .ok_or(ParseFailure::MissingWeathers)?;

    let (temps_max, temps_min) = latest_temperatures(editions)?;

    let day = |i: usize| -> Result<ForecastDay, ParseFailure> {
        let raw = date_series
            .get(i)
            .ok_or(ParseFailure::DateSeriesTooShort(date_series.len()))?;
        let weather = weather_series
            .get(i)
            .ok_or(ParseFailure::WeatherSeriesTooShort(weather_series.len()))?;

        Ok(ForecastDay {
            date: ForecastDate::Day(parse_date(raw)?),
            weather: weather.clone(),
            temp_max: temps_max.and_then(|s| s.get(i)).cloned(),
            temp_min: temps_min.and_then(|s| s.get(i)).cloned(),
        })
    };

    Ok([day(0)?, day(1)?, day(2)?])
}

/// Last `tempsMax` / `tempsMin` found on the first area of any block.
///
/// Temperatures usually live in a different block (often a different edition)
/// than the weather text, so the search runs over the whole payload. Every
/// edition must carry blocks and every block an area; only the temperature
/// series themselves may be absent.
fn latest_temperatures(
    editions: &[Edition],
) -> Result<(Option<&[String]>, Option<&[String]>), ParseFailure> {
    let mut temps_max = None;
    let mut temps_min = None;

    for (e, edition) in editions.iter().enumerate() {
        let blocks = edition
            .time_series
            .as_deref()
            .ok_or(ParseFailure::EditionWithoutTimeSeries(e))?;

        for (b, block) in blocks.iter().enumerate() {
            let area = block
                .first_area()
                .ok_or(ParseFailure::BlockWithoutAreas { edition: e, block: b })?;

            if let Some(series) = area.temps_max.as_deref() {
                temps_max = Some(series);
            }
            if let Some(series) = area.temps_min.as_deref() {
                temps_min = Some(series);
            }
        }
    }

    Ok((temps_max, temps_min))
}

/// Calendar date of an ISO-8601 timestamp, in the timestamp's own offset.
fn parse_date(raw: &str) -> Result<NaiveDate, ParseFailure> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| ParseFailure::InvalidTimestamp(raw.to_string()))
}
