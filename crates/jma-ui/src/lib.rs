//! Front-end core for the JMA forecast viewer.
//!
//! Rendering is pure (`render`), state lives in `models`, network work runs on
//! the runtime owned by `AppServices` and comes back as channel messages.

pub mod app_services;
pub mod error_mapping;
pub mod models;
pub mod render;
pub mod services;

pub use app_services::AppServices;
pub use models::{ApplyOutcome, ForecastModel, RegionModel};
pub use render::{render_forecast, render_region_menu, ForecastPanel, RegionMenu};
pub use services::{ForecastServiceError, ForecastServiceMessage, RequestToken, RequestTracker};
