//! Apparent geocentric position of the Sun.
//!
//! Low-accuracy solar theory (Meeus ch. 25): about 0.01° in longitude,
//! ample for horizon events and crescent geometry.

use crate::coords::{Equatorial, ecliptic_to_equatorial, lunar_node_deg, mean_obliquity_deg};
use crate::julian::centuries_since_j2000;

/// Astronomical unit in km.
pub const AU_KM: f64 = 149_597_870.7;

/// Sun position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Apparent ecliptic longitude (true equinox of date), degrees [0, 360).
    pub lon_deg: f64,
    /// Earth–Sun distance in AU.
    pub distance_au: f64,
    /// Apparent equatorial coordinates.
    pub equatorial: Equatorial,
}

/// Sun position at a TT Julian Date.
pub fn sun_position(jd_tt: f64) -> SunPosition {
    let t = centuries_since_j2000(jd_tt);
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let mr = m.to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mr.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mr).sin()
        + 0.000_289 * (3.0 * mr).sin();

    let true_lon = l0 + c;
    let anomaly = (m + c).to_radians();
    let distance_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * anomaly.cos());

    // Aberration and nutation in longitude
    let omega = lunar_node_deg(t).to_radians();
    let lon = true_lon - 0.005_69 - 0.004_78 * omega.sin();
    let eps = mean_obliquity_deg(t) + 0.002_56 * omega.cos();

    SunPosition {
        lon_deg: lon.rem_euclid(360.0),
        distance_au,
        equatorial: ecliptic_to_equatorial(lon, 0.0, eps),
    }
}

/// Solar angular semidiameter in degrees at a given distance.
pub fn solar_semidiameter_deg(distance_au: f64) -> f64 {
    // 959.63″ at 1 AU
    959.63 / 3600.0 / distance_au
}
