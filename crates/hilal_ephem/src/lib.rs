//! Low-precision analytic ephemeris for lunar crescent work.
//!
//! Provides:
//! - Julian Date helpers and ΔT
//! - Sidereal time and horizontal coordinates
//! - Apparent Sun and geocentric Moon positions with topocentric correction
//! - Sunset and moonset search
//! - Odeh crescent geometry (ARCV, ARCL, DAZ, W) at the best time
//! - [`FeatureProvider`] trait and the [`OdehProvider`] implementation
//!
//! Accuracy is a few hundredths of a degree over 1800–2200, far below the
//! scatter of any visibility criterion.

pub mod coords;
pub mod crescent;
pub mod error;
pub mod julian;
pub mod moon;
pub mod provider;
pub mod riseset;
pub mod sidereal;
pub mod site;
pub mod sky;
pub mod sun;
pub mod topocentric;

pub use crescent::{BEST_TIME_FRACTION, CrescentGeometry, NightUnavailable, crescent_geometry};
pub use error::EphemError;
pub use julian::{jd_at_midnight, ut_to_tt};
pub use moon::{MoonPosition, moon_position};
pub use provider::{FeatureProvider, OdehProvider, VisibilityFeatures};
pub use riseset::{SetResult, moonset, sunset};
pub use site::{DEFAULT_LATITUDE_DEG, DEFAULT_LONGITUDE_DEG, ObservationSite};
pub use sky::{SkySnapshot, sky_snapshot};
pub use sun::{SunPosition, sun_position};
