//! Crescent geometry at the best observing time (Odeh).
//!
//! The best time is Tb = Ts + 4/9 · (Tm − Ts) where Ts is sunset and Tm
//! moonset. At Tb:
//!
//! * `ARCV`: airless topocentric Moon altitude minus Sun altitude.
//! * `ARCL`: topocentric Sun–Moon elongation.
//! * `DAZ`: Sun azimuth minus Moon azimuth.
//! * `W`: topocentric crescent width, `SD · (1 − cos ARCL)`.
//!
//! Angles are in degrees throughout, including `W`.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::coords::{angular_separation_deg, normalize_to_pm180};
use crate::riseset::{SetResult, moonset, sunset};
use crate::sky::sky_snapshot;
use crate::site::ObservationSite;
use crate::topocentric::topocentric_semidiameter_deg;

/// Fraction of the sunset→moonset lag at which the crescent is best seen.
pub const BEST_TIME_FRACTION: f64 = 4.0 / 9.0;

/// Reason a night yields no crescent geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NightUnavailable {
    #[error("the Sun does not set on this day")]
    NoSunset,
    #[error("the Moon does not set within the scanned day")]
    NoMoonset,
    #[error("the Moon sets at or before sunset")]
    MoonsetBeforeSunset,
}

/// Crescent observables for one evening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrescentGeometry {
    /// Sunset (upper limb), JD UT.
    pub sunset_jd: f64,
    /// Topocentric moonset (upper limb), JD UT.
    pub moonset_jd: f64,
    /// Best observation time Tb, JD UT.
    pub best_time_jd: f64,
    /// Moonset minus sunset, minutes.
    pub lag_minutes: f64,
    /// Arc of vision at Tb, degrees.
    pub arcv_deg: f64,
    /// Topocentric Sun-Moon elongation at Tb, degrees.
    pub arcl_deg: f64,
    /// Azimuth difference Sun minus Moon at Tb, degrees.
    pub daz_deg: f64,
    /// Airless topocentric Moon altitude at Tb, degrees.
    pub moon_altitude_deg: f64,
    /// Airless Sun altitude at Tb, degrees.
    pub sun_altitude_deg: f64,
    /// Topocentric crescent width, degrees.
    pub w_topo_deg: f64,
}

/// Geometry of the crescent on the evening of `date` (00:00 UTC) at `site`.
pub fn crescent_geometry(
    date: NaiveDate,
    site: &ObservationSite,
) -> Result<CrescentGeometry, NightUnavailable> {
    let sunset_jd = match sunset(date, site) {
        SetResult::Event { jd_ut } => jd_ut,
        SetResult::NeverSets | SetResult::NeverRises => return Err(NightUnavailable::NoSunset),
    };
    let moonset_jd = moonset(date, site)
        .jd_ut()
        .ok_or(NightUnavailable::NoMoonset)?;
    if moonset_jd <= sunset_jd {
        return Err(NightUnavailable::MoonsetBeforeSunset);
    }

    let best_time_jd = sunset_jd + BEST_TIME_FRACTION * (moonset_jd - sunset_jd);
    let sky = sky_snapshot(best_time_jd, site);

    let arcl_deg = angular_separation_deg(sky.sun, sky.moon);
    let sd_topo = topocentric_semidiameter_deg(
        sky.moon_semidiameter_deg,
        sky.moon_altitude_deg,
        sky.moon_distance_km,
    );

    Ok(CrescentGeometry {
        sunset_jd,
        moonset_jd,
        best_time_jd,
        lag_minutes: (moonset_jd - sunset_jd) * 1440.0,
        arcv_deg: sky.moon_altitude_deg - sky.sun_altitude_deg,
        arcl_deg,
        daz_deg: normalize_to_pm180(sky.sun_azimuth_deg - sky.moon_azimuth_deg),
        moon_altitude_deg: sky.moon_altitude_deg,
        sun_altitude_deg: sky.sun_altitude_deg,
        w_topo_deg: sd_topo * (1.0 - arcl_deg.to_radians().cos()),
    })
}
