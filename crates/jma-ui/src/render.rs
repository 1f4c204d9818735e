//! Pure render functions: data in, fresh element tree out.
//!
//! Nothing here holds state; callers replace the whole tree on every update.

use std::fmt;

use jma_weather::{ForecastResult, Region};

pub const DATE_LABEL: &str = "日付";
pub const WEATHER_LABEL: &str = "天気";
pub const TEMP_MAX_LABEL: &str = "最高気温";
pub const TEMP_MIN_LABEL: &str = "最低気温";
pub const REGION_HINT: &str = "地域";

/// One `label: value` row of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub label: &'static str,
    pub value: String,
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub lines: Vec<CardLine>,
    pub is_error: bool,
}

/// Cards for one forecast result, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastPanel {
    pub region_code: String,
    pub cards: Vec<ForecastCard>,
}

/// Build the card panel for a forecast.
///
/// Sentinel results render as a single card flagged `is_error`.
pub fn render_forecast(region_code: &str, result: &ForecastResult) -> ForecastPanel {
    let is_error = result.is_sentinel();
    let cards = result
        .days()
        .iter()
        .map(|day| ForecastCard {
            lines: vec![
                CardLine {
                    label: DATE_LABEL,
                    value: day.date.to_string(),
                },
                CardLine {
                    label: WEATHER_LABEL,
                    value: day.weather.clone(),
                },
                CardLine {
                    label: TEMP_MAX_LABEL,
                    value: day.temp_max_label().to_string(),
                },
                CardLine {
                    label: TEMP_MIN_LABEL,
                    value: day.temp_min_label().to_string(),
                },
            ],
            is_error,
        })
        .collect();

    ForecastPanel {
        region_code: region_code.to_string(),
        cards,
    }
}

/// One selectable entry of the region menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub key: String,
    pub text: String,
}

/// The region picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMenu {
    pub label: String,
    pub hint: &'static str,
    pub options: Vec<MenuOption>,
}

pub fn render_region_menu(label: &str, regions: &[Region]) -> RegionMenu {
    RegionMenu {
        label: label.to_string(),
        hint: REGION_HINT,
        options: regions
            .iter()
            .map(|r| MenuOption {
                key: r.code.clone(),
                text: r.name.clone(),
            })
            .collect(),
    }
}

impl fmt::Display for ForecastCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = if self.is_error { "!" } else { "│" };
        writeln!(f, "┌────────────────")?;
        for line in &self.lines {
            writeln!(f, "{} {}: {}", edge, line.label, line.value)?;
        }
        write!(f, "└────────────────")
    }
}

impl fmt::Display for ForecastPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.region_code)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Display for RegionMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.label, self.hint)?;
        for option in &self.options {
            writeln!(f, "  {}  {}", option.key, option.text)?;
        }
        Ok(())
    }
}
