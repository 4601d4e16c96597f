//! Sun and Moon as seen from a site at one UT instant.

use crate::coords::{Equatorial, altitude_deg, azimuth_deg};
use crate::julian::ut_to_tt;
use crate::moon::moon_position;
use crate::sidereal::{gmst_deg, hour_angle_deg, local_sidereal_time_deg};
use crate::site::ObservationSite;
use crate::sun::sun_position;
use crate::topocentric::topocentric_place;

/// Horizontal snapshot of both luminaries.
///
/// Sun coordinates are geocentric (solar parallax is under 9″); Moon
/// coordinates are topocentric. Altitudes are airless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkySnapshot {
    /// Instant of the snapshot, JD UT.
    pub jd_ut: f64,
    /// Apparent geocentric Sun RA/Dec.
    pub sun: Equatorial,
    /// Sun altitude, degrees.
    pub sun_altitude_deg: f64,
    /// Sun azimuth from north through east, degrees.
    pub sun_azimuth_deg: f64,
    /// Topocentric Moon RA/Dec.
    pub moon: Equatorial,
    /// Topocentric Moon altitude, degrees.
    pub moon_altitude_deg: f64,
    /// Moon azimuth from north through east, degrees.
    pub moon_azimuth_deg: f64,
    /// Geocentric Earth–Moon distance, km.
    pub moon_distance_km: f64,
    /// Geocentric lunar semidiameter, degrees.
    pub moon_semidiameter_deg: f64,
}

/// Compute the sky at `jd_ut` for `site`.
pub fn sky_snapshot(jd_ut: f64, site: &ObservationSite) -> SkySnapshot {
    let jd_tt = ut_to_tt(jd_ut);
    let sun = sun_position(jd_tt);
    let moon = moon_position(jd_tt);
    let lst = local_sidereal_time_deg(gmst_deg(jd_ut), site.longitude_deg);
    let lat = site.latitude_deg;

    let sun_ha = hour_angle_deg(lst, sun.equatorial.ra_deg);
    let topo = topocentric_place(moon.equatorial, moon.distance_km, lst, site);

    SkySnapshot {
        jd_ut,
        sun: sun.equatorial,
        sun_altitude_deg: altitude_deg(sun_ha, sun.equatorial.dec_deg, lat),
        sun_azimuth_deg: azimuth_deg(sun_ha, sun.equatorial.dec_deg, lat),
        moon: topo.equatorial,
        moon_altitude_deg: altitude_deg(topo.hour_angle_deg, topo.equatorial.dec_deg, lat),
        moon_azimuth_deg: azimuth_deg(topo.hour_angle_deg, topo.equatorial.dec_deg, lat),
        moon_distance_km: moon.distance_km,
        moon_semidiameter_deg: moon.semidiameter_deg(),
    }
}
