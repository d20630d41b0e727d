//! Grid configuration: hour range, display timezone, and layout options.
//!
//! Defaults follow the weekly view: a 09:00–21:00 column in UTC with
//! out-of-office merging on and the step inferred from the data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{self, DayLayout, LayoutOptions};
use crate::error::{LayoutError, Result};
use crate::model::{AvailabilityMap, DayWindow};

pub const DEFAULT_START_HOUR: u32 = 9;
pub const DEFAULT_END_HOUR: u32 = 21;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub timezone: String,
    pub layout: LayoutOptions,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            timezone: "UTC".to_string(),
            layout: LayoutOptions::default(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LayoutError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.window_for(NaiveDate::default())?;
        self.layout.validate()
    }

    pub fn window_for(&self, date: NaiveDate) -> Result<DayWindow> {
        DayWindow::new(date, self.start_hour, self.end_hour, &self.timezone)
    }

    /// Lay out `first..=last` with this grid's hours, timezone, and options.
    pub fn layout_range(
        &self,
        map: &AvailabilityMap,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<DayLayout>> {
        engine::layout_range(
            map,
            first,
            last,
            self.start_hour,
            self.end_hour,
            &self.timezone,
            &self.layout,
        )
    }
}
