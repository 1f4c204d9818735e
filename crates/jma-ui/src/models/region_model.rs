use jma_weather::Region;

use crate::render::{render_region_menu, RegionMenu};
use crate::services::ForecastServiceError;

/// Regions loaded at startup, used to validate selections.
#[derive(Debug, Clone, Default)]
pub struct RegionModel {
    regions: Vec<Region>,
}

impl RegionModel {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn find(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }

    /// Accept `code` only if it is one of the loaded regions.
    pub fn select(&self, code: &str) -> Result<&Region, ForecastServiceError> {
        let code = code.trim();
        self.find(code)
            .ok_or_else(|| ForecastServiceError::UnknownRegion(code.to_string()))
    }

    pub fn menu(&self, label: &str) -> RegionMenu {
        render_region_menu(label, &self.regions)
    }
}
