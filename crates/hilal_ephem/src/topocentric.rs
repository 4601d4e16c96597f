//! Topocentric correction for the Moon.
//!
//! Diurnal parallax in right ascension and declination (Meeus ch. 40),
//! using the observer's geocentric position on the reference ellipsoid.

use crate::coords::Equatorial;
use crate::moon::EARTH_RADIUS_KM;
use crate::site::ObservationSite;

/// Polar/equatorial axis ratio b/a of the reference ellipsoid.
const AXIS_RATIO: f64 = 0.996_647_19;

/// Observer geocentric factors (ρ sin φ′, ρ cos φ′) in Earth radii.
pub fn parallax_factors(site: &ObservationSite) -> (f64, f64) {
    let phi = site.latitude_deg.to_radians();
    let u = (AXIS_RATIO * phi.tan()).atan();
    let h = site.elevation_m / (EARTH_RADIUS_KM * 1000.0);
    let rho_sin = AXIS_RATIO * u.sin() + h * phi.sin();
    let rho_cos = u.cos() + h * phi.cos();
    (rho_sin, rho_cos)
}

/// Topocentric place of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopocentricPlace {
    /// Topocentric right ascension and declination.
    pub equatorial: Equatorial,
    /// Topocentric hour angle in degrees, [-180, 180).
    pub hour_angle_deg: f64,
}

/// Shift a geocentric position to the observer's site.
///
/// `lst_deg` is the local sidereal time, `distance_km` the geocentric distance.
pub fn topocentric_place(
    geo: Equatorial,
    distance_km: f64,
    lst_deg: f64,
    site: &ObservationSite,
) -> TopocentricPlace {
    let (rho_sin, rho_cos) = parallax_factors(site);
    let sin_pi = EARTH_RADIUS_KM / distance_km;
    let ha = (lst_deg - geo.ra_deg).to_radians();
    let (sin_dec, cos_dec) = geo.dec_deg.to_radians().sin_cos();

    let denom = cos_dec - rho_cos * sin_pi * ha.cos();
    let dra = (-rho_cos * sin_pi * ha.sin()).atan2(denom);
    let dec = ((sin_dec - rho_sin * sin_pi) * dra.cos()).atan2(denom);

    let dra_deg = dra.to_degrees();
    TopocentricPlace {
        equatorial: Equatorial {
            ra_deg: (geo.ra_deg + dra_deg).rem_euclid(360.0),
            dec_deg: dec.to_degrees(),
        },
        hour_angle_deg: crate::sidereal::hour_angle_deg(lst_deg, geo.ra_deg + dra_deg),
    }
}

/// Topocentric semidiameter from the geocentric one.
///
/// The Moon is closer to an observer who sees it higher, so its disk grows
/// with altitude (about 0.3′ at the zenith).
pub fn topocentric_semidiameter_deg(geo_sd_deg: f64, altitude_deg: f64, distance_km: f64) -> f64 {
    let sin_pi = EARTH_RADIUS_KM / distance_km;
    geo_sd_deg * (1.0 + altitude_deg.to_radians().sin() * sin_pi)
}
