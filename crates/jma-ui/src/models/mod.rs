pub mod forecast_model;
pub mod region_model;

pub use forecast_model::{ApplyOutcome, ForecastModel};
pub use region_model::RegionModel;
