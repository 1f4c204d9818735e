use std::path::Path;
use std::sync::Arc;

use crate::{AppError, Config};

/// Main application state and lifecycle manager
#[derive(Debug, Clone)]
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create an application from the config file at `path` (or the default
    /// location). Invalid configuration is an error; warnings are logged.
    pub fn new(path: Option<&Path>) -> Result<Self, AppError> {
        let (config, _) = Config::load_validated(path)?;
        Ok(Self::with_config(config))
    }

    /// Create an application around an already-built config.
    pub fn with_config(config: Config) -> Self {
        tracing::info!(
            "Application configured for {} ({:?} section)",
            config.jma.area_url,
            config.jma.area_section
        );
        Self {
            config: Arc::new(config),
        }
    }

    /// Shutdown the application
    pub fn shutdown(&self) {
        tracing::info!("Shutting down application");
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }
}
