use anyhow::{Context, Result};
use jma_weather::{AREA_LIST_URL, CODE_PLACEHOLDER, DEFAULT_TIMEOUT_SECS, FORECAST_URL_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

pub use jma_weather::AreaSection;

/// Longest accepted request timeout.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Timeouts above this still work but are logged as suspicious.
const LONG_TIMEOUT_SECS: u64 = 60;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// JMA endpoint settings
    #[serde(default)]
    pub jma: JmaConfig,

    /// Display settings
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JmaConfig {
    /// Area directory URL
    #[serde(default = "default_area_url")]
    pub area_url: String,

    /// Forecast URL with `{code}` in place of the region code
    #[serde(default = "default_forecast_url_template")]
    pub forecast_url_template: String,

    /// Which directory section lists the regions; one per deployment
    #[serde(default)]
    pub area_section: AreaSection,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_area_url() -> String {
    AREA_LIST_URL.to_string()
}

fn default_forecast_url_template() -> String {
    FORECAST_URL_TEMPLATE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for JmaConfig {
    fn default() -> Self {
        Self {
            area_url: default_area_url(),
            forecast_url_template: default_forecast_url_template(),
            area_section: AreaSection::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Heading printed above the region menu
    #[serde(default = "default_title")]
    pub title: String,

    /// Prompt shown when asking for a region
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_title() -> String {
    "天気予報アプリ".to_string()
}

fn default_prompt() -> String {
    "地域を選択してください".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            prompt: default_prompt(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; nothing is written to disk.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings, which are also
    /// logged. An unreadable file and failed validation are distinct errors.
    pub fn load_validated(
        path: Option<&Path>,
    ) -> std::result::Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load(path).map_err(|e| ConfigError::ParseError(format!("{:#}", e)))?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.jma.area_url, "jma.area_url", &mut result);

        if !self.jma.forecast_url_template.contains(CODE_PLACEHOLDER) {
            result.add_error(
                "jma.forecast_url_template",
                format!("Template must contain {}", CODE_PLACEHOLDER),
            );
        }
        // Substitute a sample code so the template parses as a URL.
        let sample = self.jma.forecast_url_template.replace(CODE_PLACEHOLDER, "130000");
        self.validate_url(&sample, "jma.forecast_url_template", &mut result);

        match self.jma.timeout_secs {
            0 => result.add_error("jma.timeout_secs", "Timeout must be greater than 0"),
            t if t > MAX_TIMEOUT_SECS => result.add_error(
                "jma.timeout_secs",
                format!("Timeout must be at most {} seconds", MAX_TIMEOUT_SECS),
            ),
            t if t > LONG_TIMEOUT_SECS => {
                result.add_warning("jma.timeout_secs", "Timeout is longer than a minute")
            }
            _ => {}
        }

        if self.ui.prompt.trim().is_empty() {
            result.add_warning("ui.prompt", "Prompt is empty");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Get the path to the default configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("jma-forecast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.jma.area_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "jma.area_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.jma.area_url = "ftp://www.jma.go.jp/area.json".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_template_without_placeholder() {
        let mut config = Config::default();
        config.jma.forecast_url_template =
            "https://www.jma.go.jp/bosai/forecast/data/forecast/130000.json".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "jma.forecast_url_template"));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.jma.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "jma.timeout_secs"));
    }

    #[test]
    fn test_long_timeout_is_warning() {
        let mut config = Config::default();
        config.jma.timeout_secs = 120;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "jma.timeout_secs"));
    }

    #[test]
    fn test_timeout_upper_bound() {
        let mut config = Config::default();
        config.jma.timeout_secs = MAX_TIMEOUT_SECS;
        assert!(config.validate().is_valid());

        for timeout in [MAX_TIMEOUT_SECS + 1, u64::MAX] {
            config.jma.timeout_secs = timeout;
            let result = config.validate();
            assert!(!result.is_valid(), "timeout {} accepted", timeout);
            assert!(result.errors.iter().any(|e| e.field == "jma.timeout_secs"));
        }
    }

    #[test]
    fn test_load_validated_rejects_huge_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[jma]\ntimeout_secs = {}", i64::MAX).unwrap();

        let err = Config::load_validated(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("jma.timeout_secs")));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.jma.area_section, AreaSection::Offices);
        assert_eq!(config.jma.timeout_secs, 10);
        assert!(!dir.path().join("absent.toml").exists());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[jma]\narea_section = \"centers\"\ntimeout_secs = 3").unwrap();

        let (config, validation) = Config::load_validated(Some(file.path())).unwrap();
        assert!(validation.is_valid());
        assert_eq!(config.jma.area_section, AreaSection::Centers);
        assert_eq!(config.jma.timeout_secs, 3);
        assert_eq!(config.jma.area_url, default_area_url());
        assert_eq!(config.ui.title, "天気予報アプリ");
    }

    #[test]
    fn test_load_validated_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[jma]\ntimeout_secs = 0").unwrap();

        let err = Config::load_validated(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("jma.timeout_secs"));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[jma\narea_url = ").unwrap();
        assert!(Config::load(Some(file.path())).is_err());

        let err = Config::load_validated(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
