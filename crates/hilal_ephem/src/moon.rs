//! Geocentric position of the Moon.
//!
//! Truncated ELP-2000/82 series as tabulated by Meeus (ch. 47): the 32
//! largest longitude/distance terms and 20 largest latitude terms. Errors
//! stay around 0.01° in longitude and 0.005° in latitude, well inside what
//! crescent criteria resolve.

use crate::coords::{Equatorial, ecliptic_to_equatorial, mean_obliquity_deg, nutation_deg};
use crate::julian::centuries_since_j2000;

/// Mean lunar radius in km (IAU).
pub const MOON_RADIUS_KM: f64 = 1_737.4;

/// Equatorial Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6_378.14;

/// Periodic term: multiples of (D, M, M', F) and sine/cosine coefficients.
struct Term {
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
    sin_coeff: f64,
    cos_coeff: f64,
}

const fn term(d: i8, m: i8, mp: i8, f: i8, sin_coeff: f64, cos_coeff: f64) -> Term {
    Term {
        d,
        m,
        mp,
        f,
        sin_coeff,
        cos_coeff,
    }
}

/// Longitude (1e-6 deg, sine) and distance (1e-3 km, cosine) terms.
const LON_DIST_TERMS: [Term; 32] = [
    term(0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    term(2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    term(2, 0, 0, 0, 658_314.0, -2_955_968.0),
    term(0, 0, 2, 0, 213_618.0, -569_925.0),
    term(0, 1, 0, 0, -185_116.0, 48_888.0),
    term(0, 0, 0, 2, -114_332.0, -3_149.0),
    term(2, 0, -2, 0, 58_793.0, 246_158.0),
    term(2, -1, -1, 0, 57_066.0, -152_138.0),
    term(2, 0, 1, 0, 53_322.0, -170_733.0),
    term(2, -1, 0, 0, 45_758.0, -204_586.0),
    term(0, 1, -1, 0, -40_923.0, -129_620.0),
    term(1, 0, 0, 0, -34_720.0, 108_743.0),
    term(0, 1, 1, 0, -30_383.0, 104_755.0),
    term(2, 0, 0, -2, 15_327.0, 10_321.0),
    term(0, 0, 1, 2, -12_528.0, 0.0),
    term(0, 0, 1, -2, 10_980.0, 79_661.0),
    term(4, 0, -1, 0, 10_675.0, -34_782.0),
    term(0, 0, 3, 0, 10_034.0, -23_210.0),
    term(4, 0, -2, 0, 8_548.0, -21_636.0),
    term(2, 1, -1, 0, -7_888.0, 24_208.0),
    term(2, 1, 0, 0, -6_766.0, 30_824.0),
    term(1, 0, -1, 0, -5_163.0, -8_379.0),
    term(1, 1, 0, 0, 4_987.0, -16_675.0),
    term(2, -1, 1, 0, 4_036.0, -12_831.0),
    term(2, 0, 2, 0, 3_994.0, -10_445.0),
    term(4, 0, 0, 0, 3_861.0, -11_650.0),
    term(2, 0, -3, 0, 3_665.0, 14_403.0),
    term(0, 1, -2, 0, -2_689.0, -7_003.0),
    term(2, 0, -1, 2, -2_602.0, 0.0),
    term(2, -1, -2, 0, 2_390.0, 10_056.0),
    term(1, 0, 1, 0, -2_348.0, 6_322.0),
    term(2, -2, 0, 0, 2_236.0, -9_884.0),
];

/// Latitude terms (1e-6 deg, sine).
const LAT_TERMS: [Term; 20] = [
    term(0, 0, 0, 1, 5_128_122.0, 0.0),
    term(0, 0, 1, 1, 280_602.0, 0.0),
    term(0, 0, 1, -1, 277_693.0, 0.0),
    term(2, 0, 0, -1, 173_237.0, 0.0),
    term(2, 0, -1, 1, 55_413.0, 0.0),
    term(2, 0, -1, -1, 46_271.0, 0.0),
    term(2, 0, 0, 1, 32_573.0, 0.0),
    term(0, 0, 2, 1, 17_198.0, 0.0),
    term(2, 0, 1, -1, 9_266.0, 0.0),
    term(0, 0, 2, -1, 8_822.0, 0.0),
    term(2, -1, 0, -1, 8_216.0, 0.0),
    term(2, 0, -2, -1, 4_324.0, 0.0),
    term(2, 0, 1, 1, 4_200.0, 0.0),
    term(2, 1, 0, -1, -3_359.0, 0.0),
    term(2, -1, -1, 1, 2_463.0, 0.0),
    term(2, -1, 0, 1, 2_211.0, 0.0),
    term(2, -1, -1, -1, 2_065.0, 0.0),
    term(0, 1, -1, -1, -1_870.0, 0.0),
    term(4, 0, -1, -1, 1_828.0, 0.0),
    term(0, 1, 0, 1, -1_794.0, 0.0),
];

/// Moon position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    /// Geometric ecliptic longitude (mean equinox of date), degrees [0, 360).
    pub lon_deg: f64,
    /// Ecliptic latitude, degrees.
    pub lat_deg: f64,
    /// Earth–Moon center distance in km.
    pub distance_km: f64,
    /// Apparent geocentric equatorial coordinates.
    pub equatorial: Equatorial,
}

impl MoonPosition {
    /// Equatorial horizontal parallax, degrees.
    pub fn horizontal_parallax_deg(&self) -> f64 {
        (EARTH_RADIUS_KM / self.distance_km).asin().to_degrees()
    }

    /// Geocentric angular semidiameter, degrees.
    pub fn semidiameter_deg(&self) -> f64 {
        (MOON_RADIUS_KM / self.distance_km).asin().to_degrees()
    }
}

/// Fundamental arguments (L', D, M, M', F) in degrees.
fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let l_prime = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let m_prime = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    [l_prime, d, m, m_prime, f]
}

/// Moon position at a TT Julian Date.
pub fn moon_position(jd_tt: f64) -> MoonPosition {
    let t = centuries_since_j2000(jd_tt);
    let [l_prime, d, m, m_prime, f] = fundamental_arguments(t);
    // Eccentricity factor for terms involving the Sun's anomaly
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;

    let argument = |tm: &Term| {
        (f64::from(tm.d) * d + f64::from(tm.m) * m + f64::from(tm.mp) * m_prime + f64::from(tm.f) * f)
            .to_radians()
    };
    let e_factor = |tm: &Term| e.powi(i32::from(tm.m.abs()));

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for tm in &LON_DIST_TERMS {
        let arg = argument(tm);
        let k = e_factor(tm);
        sum_l += tm.sin_coeff * k * arg.sin();
        sum_r += tm.cos_coeff * k * arg.cos();
    }
    let mut sum_b = 0.0;
    for tm in &LAT_TERMS {
        sum_b += tm.sin_coeff * e_factor(tm) * argument(tm).sin();
    }

    // Venus, Jupiter and flattening perturbations
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();
    let lp = l_prime.to_radians();
    let fr = f.to_radians();
    let mpr = m_prime.to_radians();
    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - fr).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - fr).sin()
        + 175.0 * (a1 + fr).sin()
        + 127.0 * (lp - mpr).sin()
        - 115.0 * (lp + mpr).sin();

    let lon = (l_prime + sum_l / 1e6).rem_euclid(360.0);
    let lat = sum_b / 1e6;
    let distance_km = 385_000.56 + sum_r / 1000.0;

    let (dpsi, deps) = nutation_deg(t);
    let eps = mean_obliquity_deg(t) + deps;

    MoonPosition {
        lon_deg: lon,
        lat_deg: lat,
        distance_km,
        equatorial: ecliptic_to_equatorial(lon + dpsi, lat, eps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Meeus example 47.a: 1992 April 12.0 TD.
    #[test]
    fn meeus_example_47a() {
        let moon = moon_position(2_448_724.5);
        assert!((moon.lon_deg - 133.162_655).abs() < 0.01, "lon {}", moon.lon_deg);
        assert!((moon.lat_deg + 3.229_126).abs() < 0.02, "lat {}", moon.lat_deg);
        assert!((moon.distance_km - 368_409.7).abs() < 100.0);
        assert!((moon.equatorial.ra_deg - 134.688_470).abs() < 0.02);
        assert!((moon.equatorial.dec_deg - 13.768_368).abs() < 0.02);
    }

    #[test]
    fn parallax_in_range() {
        for i in 0..30 {
            let moon = moon_position(2_460_000.5 + i as f64);
            let p = moon.horizontal_parallax_deg();
            // 53.9′ (apogee) .. 61.5′ (perigee)
            assert!(p > 0.89 && p < 1.03, "parallax {p}");
        }
    }

    #[test]
    fn semidiameter_about_quarter_degree() {
        let moon = moon_position(2_460_000.5);
        let sd = moon.semidiameter_deg();
        assert!(sd > 0.24 && sd < 0.29, "sd {sd}");
    }

    #[test]
    fn new_moon_conjunction_2023_03_21() {
        // New moon 2023-03-21 17:23 UTC (JD UT 2460025.224)
        let moon = moon_position(2_460_025.225);
        let sun = crate::sun::sun_position(2_460_025.225);
        let elong = crate::coords::normalize_to_pm180(moon.lon_deg - sun.lon_deg);
        assert!(elong.abs() < 0.5, "elongation {elong}");
    }
}
