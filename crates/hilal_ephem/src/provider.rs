//! Visibility feature extraction for a candidate night.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crescent::crescent_geometry;
use crate::error::EphemError;
use crate::site::ObservationSite;

/// Inputs to a crescent visibility classifier.
///
/// Both values are finite; [`VisibilityFeatures::new`] refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityFeatures {
    /// Arc of vision, degrees.
    pub arcv_deg: f64,
    /// Topocentric crescent width, degrees.
    pub w_topo_deg: f64,
}

impl VisibilityFeatures {
    pub fn new(arcv_deg: f64, w_topo_deg: f64) -> Option<Self> {
        (arcv_deg.is_finite() && w_topo_deg.is_finite()).then_some(Self {
            arcv_deg,
            w_topo_deg,
        })
    }

    /// Features in classifier input order: `[arcv, W_topo]`.
    pub fn as_array(&self) -> [f64; 2] {
        [self.arcv_deg, self.w_topo_deg]
    }
}

/// Source of visibility features for a night at a location.
///
/// `None` means the parameters cannot be computed for that night.
pub trait FeatureProvider: Send + Sync {
    fn compute_features(
        &self,
        date: NaiveDate,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Option<VisibilityFeatures>;
}

impl<P: FeatureProvider + ?Sized> FeatureProvider for Box<P> {
    fn compute_features(
        &self,
        date: NaiveDate,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Option<VisibilityFeatures> {
        (**self).compute_features(date, latitude_deg, longitude_deg)
    }
}

impl<P: FeatureProvider + ?Sized> FeatureProvider for std::sync::Arc<P> {
    fn compute_features(
        &self,
        date: NaiveDate,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Option<VisibilityFeatures> {
        (**self).compute_features(date, latitude_deg, longitude_deg)
    }
}

/// Odeh-style features from the built-in analytic ephemeris.
#[derive(Debug, Clone, Copy, Default)]
pub struct OdehProvider {
    elevation_m: f64,
}

impl OdehProvider {
    /// Provider for observers at `elevation_m` above sea level.
    pub fn new(elevation_m: f64) -> Result<Self, EphemError> {
        ObservationSite::new(0.0, 0.0, elevation_m)?;
        Ok(Self { elevation_m })
    }

    /// Provider using the elevation of `site`.
    pub fn for_site(site: &ObservationSite) -> Result<Self, EphemError> {
        site.validate().map_err(EphemError::InvalidSite)?;
        Ok(Self {
            elevation_m: site.elevation_m,
        })
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }
}

impl FeatureProvider for OdehProvider {
    fn compute_features(
        &self,
        date: NaiveDate,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Option<VisibilityFeatures> {
        let site = match ObservationSite::new(latitude_deg, longitude_deg, self.elevation_m) {
            Ok(site) => site,
            Err(e) => {
                debug!(%date, error = %e, "rejected site");
                return None;
            }
        };
        match crescent_geometry(date, &site) {
            Ok(g) => VisibilityFeatures::new(g.arcv_deg, g.w_topo_deg),
            Err(reason) => {
                debug!(%date, %reason, "crescent parameters unavailable");
                None
            }
        }
    }
}
