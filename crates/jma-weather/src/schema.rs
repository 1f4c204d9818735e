//! Partial schemas for the JMA `bosai` JSON documents.
//!
//! Only the fields the extractor reads are declared; everything else in the
//! payload is ignored. Every field is optional so that absence surfaces as a
//! specific extraction failure instead of a generic deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Region, WeatherError};

/// Which section of `area.json` lists the selectable regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AreaSection {
    /// Forecast offices (`130000` Tokyo, `270000` Osaka, ...).
    #[default]
    Offices,
    /// Regional centers (`010300` Kanto-Koshin, ...).
    Centers,
}

impl AreaSection {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Offices => "offices",
            Self::Centers => "centers",
        }
    }
}

/// `area.json`. Sections keep document order (serde_json `preserve_order`).
#[derive(Debug, Deserialize)]
pub struct AreaDirectory {
    centers: Option<Map<String, Value>>,
    offices: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct AreaEntry {
    name: String,
}

impl AreaDirectory {
    /// Flatten one section into regions, in document order.
    pub fn into_regions(self, section: AreaSection) -> Result<Vec<Region>, WeatherError> {
        let entries = match section {
            AreaSection::Offices => self.offices,
            AreaSection::Centers => self.centers,
        }
        .ok_or_else(|| {
            WeatherError::Parse(format!("area directory has no '{}' section", section.key()))
        })?;

        entries
            .into_iter()
            .map(|(code, value)| {
                let entry: AreaEntry = serde_json::from_value(value).map_err(|e| {
                    WeatherError::Parse(format!("area '{}' is malformed: {}", code, e))
                })?;
                Ok(Region {
                    code,
                    name: entry.name,
                })
            })
            .collect()
    }
}

/// One top-level entry of the forecast array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    pub time_series: Option<Vec<TimeSeries>>,
}

/// One block of an edition: a set of time points and per-area series.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub time_defines: Option<Vec<String>>,
    pub areas: Option<Vec<AreaSeries>>,
}

impl TimeSeries {
    pub fn first_area(&self) -> Option<&AreaSeries> {
        self.areas.as_ref().and_then(|areas| areas.first())
    }
}

/// Series for one area inside a block.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSeries {
    pub weathers: Option<Vec<String>>,
    pub temps_max: Option<Vec<String>>,
    pub temps_min: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_section_serde() {
        let section: AreaSection = serde_json::from_str("\"centers\"").unwrap();
        assert_eq!(section, AreaSection::Centers);
        assert_eq!(AreaSection::default().key(), "offices");
    }

    #[test]
    fn test_directory_keeps_document_order() {
        let dir: AreaDirectory = serde_json::from_str(
            r#"{"offices": {
                "471000": {"name": "沖縄本島地方"},
                "011000": {"name": "宗谷地方"},
                "130000": {"name": "東京都"}
            }}"#,
        )
        .unwrap();
        let regions = dir.into_regions(AreaSection::Offices).unwrap();
        let codes: Vec<_> = regions.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["471000", "011000", "130000"]);
        assert_eq!(regions[2].name, "東京都");
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let dir: AreaDirectory =
            serde_json::from_str(r#"{"offices": {"130000": {"name": "東京都"}}}"#).unwrap();
        let err = dir.into_regions(AreaSection::Centers).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(ref m) if m.contains("centers")));
    }

    #[test]
    fn test_entry_without_name_is_parse_error() {
        let dir: AreaDirectory =
            serde_json::from_str(r#"{"centers": {"010100": {"enName": "Hokkaido"}}}"#).unwrap();
        let err = dir.into_regions(AreaSection::Centers).unwrap_err();
        assert!(err.to_string().contains("010100"));
    }

    #[test]
    fn test_time_series_ignores_unknown_fields() {
        let ts: TimeSeries = serde_json::from_str(
            r#"{"timeDefines": ["2024-06-01T17:00:00+09:00"],
                "areas": [{"area": {"name": "東京地方", "code": "130010"},
                           "weatherCodes": ["100"], "weathers": ["晴れ"]}]}"#,
        )
        .unwrap();
        let area = ts.first_area().unwrap();
        assert_eq!(area.weathers.as_deref(), Some(&["晴れ".to_string()][..]));
        assert!(area.temps_max.is_none());
    }
}
