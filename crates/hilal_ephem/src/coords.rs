//! Ecliptic, equatorial and horizontal coordinate conversions.
//!
//! All angles are in degrees at the API boundary.

/// Equatorial coordinates: right ascension and declination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in degrees, range [0, 360).
    pub ra_deg: f64,
    /// Declination in degrees, range [-90, 90].
    pub dec_deg: f64,
}

/// Mean obliquity of the ecliptic (IAU 1980), degrees.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 21.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / 3600.0
}

/// Longitude of the Moon's ascending node, degrees.
pub fn lunar_node_deg(t: f64) -> f64 {
    125.044_52 - 1934.136_261 * t
}

/// Dominant nutation terms: (Δψ in longitude, Δε in obliquity), degrees.
///
/// Only the 18.6-year node term is kept; the remainder is below 1.5″.
pub fn nutation_deg(t: f64) -> (f64, f64) {
    let omega = lunar_node_deg(t).to_radians();
    (-0.004_78 * omega.sin(), 0.002_56 * omega.cos())
}

/// Rotate ecliptic (lon, lat) into equatorial (RA, Dec) for obliquity `eps_deg`.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, eps_deg: f64) -> Equatorial {
    let (sl, cl) = lon_deg.to_radians().sin_cos();
    let (sb, cb) = lat_deg.to_radians().sin_cos();
    let (se, ce) = eps_deg.to_radians().sin_cos();
    let ra = (sl * ce - (sb / cb) * se).atan2(cl);
    let dec = (sb * ce + cb * se * sl).asin();
    Equatorial {
        ra_deg: ra.to_degrees().rem_euclid(360.0),
        dec_deg: dec.to_degrees(),
    }
}

/// Altitude above the geometric horizon for a given hour angle, degrees.
pub fn altitude_deg(hour_angle_deg: f64, dec_deg: f64, latitude_deg: f64) -> f64 {
    let (sd, cd) = dec_deg.to_radians().sin_cos();
    let (sp, cp) = latitude_deg.to_radians().sin_cos();
    let ch = hour_angle_deg.to_radians().cos();
    (sp * sd + cp * cd * ch).clamp(-1.0, 1.0).asin().to_degrees()
}

/// Azimuth measured from north through east, degrees [0, 360).
pub fn azimuth_deg(hour_angle_deg: f64, dec_deg: f64, latitude_deg: f64) -> f64 {
    let (sh, ch) = hour_angle_deg.to_radians().sin_cos();
    let (sp, cp) = latitude_deg.to_radians().sin_cos();
    let td = dec_deg.to_radians().tan();
    // Meeus measures from south; rotate by 180°
    let south = sh.atan2(ch * sp - td * cp).to_degrees();
    (south + 180.0).rem_euclid(360.0)
}

/// Great-circle separation between two equatorial positions, degrees [0, 180].
pub fn angular_separation_deg(a: Equatorial, b: Equatorial) -> f64 {
    let (sd1, cd1) = a.dec_deg.to_radians().sin_cos();
    let (sd2, cd2) = b.dec_deg.to_radians().sin_cos();
    let cdra = (a.ra_deg - b.ra_deg).to_radians().cos();
    (sd1 * sd2 + cd1 * cd2 * cdra).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Normalize an angle to [-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obliquity_j2000() {
        assert!((mean_obliquity_deg(0.0) - 23.439_291).abs() < 1e-6);
    }

    #[test]
    fn equinox_maps_to_origin() {
        let eq = ecliptic_to_equatorial(0.0, 0.0, 23.44);
        assert!(eq.ra_deg.abs() < 1e-12 || (eq.ra_deg - 360.0).abs() < 1e-12);
        assert!(eq.dec_deg.abs() < 1e-12);
    }

    #[test]
    fn solstice_dec_equals_obliquity() {
        let eq = ecliptic_to_equatorial(90.0, 0.0, 23.44);
        assert!((eq.ra_deg - 90.0).abs() < 1e-9);
        assert!((eq.dec_deg - 23.44).abs() < 1e-9);
    }

    #[test]
    fn zenith_on_meridian() {
        let alt = altitude_deg(0.0, 34.0, 34.0);
        assert!((alt - 90.0).abs() < 1e-6);
    }

    #[test]
    fn setting_body_is_west() {
        // Positive hour angle = past meridian = western sky
        let az = azimuth_deg(80.0, 0.0, 34.0);
        assert!(az > 180.0 && az < 360.0, "az {az}");
    }

    #[test]
    fn separation_of_identical_points_is_zero() {
        let p = Equatorial {
            ra_deg: 12.0,
            dec_deg: -5.0,
        };
        assert!(angular_separation_deg(p, p).abs() < 1e-6);
    }

    #[test]
    fn separation_along_equator() {
        let a = Equatorial {
            ra_deg: 10.0,
            dec_deg: 0.0,
        };
        let b = Equatorial {
            ra_deg: 40.0,
            dec_deg: 0.0,
        };
        assert!((angular_separation_deg(a, b) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_wraps() {
        assert!((normalize_to_pm180(190.0) + 170.0).abs() < 1e-12);
        assert!((normalize_to_pm180(-190.0) - 170.0).abs() < 1e-12);
        assert!((normalize_to_pm180(180.0) - 180.0).abs() < 1e-12);
    }
}
