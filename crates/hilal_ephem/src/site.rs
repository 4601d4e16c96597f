//! Observer location on the Earth's surface.

use serde::{Deserialize, Serialize};

use crate::error::EphemError;

/// Reference site latitude in degrees (Rabat).
pub const DEFAULT_LATITUDE_DEG: f64 = 34.0084;

/// Reference site longitude in degrees, east positive.
pub const DEFAULT_LONGITUDE_DEG: f64 = 6.8539;

/// Geographic observation site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservationSite {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Height above mean sea level in meters.
    #[serde(default)]
    pub elevation_m: f64,
}

impl Default for ObservationSite {
    fn default() -> Self {
        Self {
            latitude_deg: DEFAULT_LATITUDE_DEG,
            longitude_deg: DEFAULT_LONGITUDE_DEG,
            elevation_m: 0.0,
        }
    }
}

impl ObservationSite {
    /// Create a validated site.
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Result<Self, EphemError> {
        let site = Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        };
        site.validate().map_err(EphemError::InvalidSite)?;
        Ok(site)
    }

    /// Same site with a different latitude/longitude, elevation kept.
    pub fn at(&self, latitude_deg: f64, longitude_deg: f64) -> Result<Self, EphemError> {
        Self::new(latitude_deg, longitude_deg, self.elevation_m)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err("latitude must be within [-90, 90] degrees");
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err("longitude must be within [-180, 180] degrees");
        }
        if !self.elevation_m.is_finite() || self.elevation_m < -500.0 || self.elevation_m > 9_000.0
        {
            return Err("elevation must be within [-500, 9000] meters");
        }
        Ok(())
    }
}
