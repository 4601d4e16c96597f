//! Greenwich mean sidereal time.
//!
//! Converts between the celestial (RA/Dec) and local (hour angle) frames.
//! Takes UT Julian Dates; UT1−UTC is below a second and ignored.
//!
//! Source: Meeus, Astronomical Algorithms, Eq. 12.4.

use crate::julian::{J2000_JD, centuries_since_j2000};

/// Greenwich Mean Sidereal Time at a UT Julian Date, in degrees [0, 360).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = centuries_since_j2000(jd_ut);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD)
        + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    theta.rem_euclid(360.0)
}

/// Local sidereal time from GMST and observer east longitude, degrees [0, 360).
pub fn local_sidereal_time_deg(gmst_deg: f64, longitude_east_deg: f64) -> f64 {
    (gmst_deg + longitude_east_deg).rem_euclid(360.0)
}

/// Hour angle of a body with right ascension `ra_deg`, normalized to [-180, 180).
pub fn hour_angle_deg(lst_deg: f64, ra_deg: f64) -> f64 {
    (lst_deg - ra_deg + 180.0).rem_euclid(360.0) - 180.0
}
