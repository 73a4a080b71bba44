//! Console configuration loaded from TOML.
//!
//! Every key is optional. Example:
//!
//! ```toml
//! theme = "night"
//! area_name = "LOS ANGELES"
//! reference_lat = 34.052235
//! reference_lon = -118.243683
//! zoom = 12
//! roster_path = "/srv/scope/roster.json"
//! log_file = "/tmp/scope-console.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use scope_model::{
    ReferencePoint, Roster, Theme, DEFAULT_AREA_NAME, DEFAULT_PROJECTION_SCALE,
    DEFAULT_REFERENCE_LAT, DEFAULT_REFERENCE_LON, DEFAULT_ZOOM_LEVEL,
};
use scope_overlay::Viewport;
use serde::{Deserialize, Serialize};

use crate::ConsoleError;

const MIN_TICK_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub theme: Theme,
    pub area_name: String,
    pub reference_lat: f64,
    pub reference_lon: f64,
    /// Panel fractions per degree at 12x.
    pub base_scale: f64,
    pub zoom: u8,
    /// Period of the header clock and mission timer.
    pub tick_ms: u64,
    /// JSON roster replacing the built-in mock roster.
    pub roster_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Day,
            area_name: DEFAULT_AREA_NAME.to_string(),
            reference_lat: DEFAULT_REFERENCE_LAT,
            reference_lon: DEFAULT_REFERENCE_LON,
            base_scale: DEFAULT_PROJECTION_SCALE,
            zoom: DEFAULT_ZOOM_LEVEL,
            tick_ms: 1000,
            roster_path: None,
            log_file: None,
        }
    }
}

impl ConsoleConfig {
    /// `<config_dir>/nsg-scope/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("nsg-scope").join("config.toml"))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConsoleError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject projection settings the viewport cannot place markers with.
    /// TOML accepts `nan` and `inf` as floats.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if !self.base_scale.is_finite() || self.base_scale <= 0.0 {
            return Err(ConsoleError::ConfigValue {
                key: "base_scale",
                value: self.base_scale,
            });
        }
        if !self.reference_lat.is_finite() || !(-90.0..=90.0).contains(&self.reference_lat) {
            return Err(ConsoleError::ConfigValue {
                key: "reference_lat",
                value: self.reference_lat,
            });
        }
        if !self.reference_lon.is_finite() || !(-180.0..=180.0).contains(&self.reference_lon) {
            return Err(ConsoleError::ConfigValue {
                key: "reference_lon",
                value: self.reference_lon,
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConsoleError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConsoleError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load an explicitly requested file, or the default file when it exists.
    ///
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConsoleError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn reference(&self) -> ReferencePoint {
        ReferencePoint::new(self.reference_lat, self.reference_lon)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.reference(), self.base_scale, self.zoom, &self.area_name)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(MIN_TICK_MS))
    }

    /// The configured roster file, or the built-in mock roster.
    pub fn load_roster(&self) -> Result<Roster, ConsoleError> {
        match &self.roster_path {
            Some(path) => Ok(Roster::load(path)?),
            None => Ok(Roster::mock()),
        }
    }
}
