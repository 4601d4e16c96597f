//! Sunset and moonset for an evening.
//!
//! Coarse scan forward from approximate local noon in 10-minute steps,
//! then bisection on the first above-to-below crossing of the altitude
//! function. One solar day is scanned.

use chrono::NaiveDate;

use crate::julian::jd_at_midnight;
use crate::sky::sky_snapshot;
use crate::site::ObservationSite;

/// Scan step in days (10 minutes).
pub const SCAN_STEP_DAYS: f64 = 10.0 / 1440.0;

/// Number of scan steps (24 hours).
pub const SCAN_STEPS: usize = 144;

/// Bisection iterations once a crossing is bracketed (sub-millisecond).
pub const BISECTION_ITERATIONS: usize = 40;

/// Sunset depression: 34′ refraction + 16′ solar semidiameter.
pub const SUNSET_DEPRESSION_DEG: f64 = 50.0 / 60.0;

/// Standard horizontal refraction.
pub const HORIZON_REFRACTION_DEG: f64 = 34.0 / 60.0;

/// Outcome of a setting search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetResult {
    /// Body sets at the given UT Julian Date.
    Event { jd_ut: f64 },
    /// Body stays above the horizon for the scanned day.
    NeverSets,
    /// Body is below the horizon for the whole scanned day.
    NeverRises,
}

impl SetResult {
    /// Setting time, if any.
    pub fn jd_ut(self) -> Option<f64> {
        match self {
            Self::Event { jd_ut } => Some(jd_ut),
            Self::NeverSets | Self::NeverRises => None,
        }
    }
}

/// Approximate local solar noon JD from 0h UT JD and east longitude.
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

/// First time after `start_jd` where `f` goes from positive to non-positive.
pub fn find_setting<F>(f: F, start_jd: f64) -> SetResult
where
    F: Fn(f64) -> f64,
{
    let mut t_prev = start_jd;
    let mut f_prev = f(t_prev);
    let mut ever_above = f_prev > 0.0;

    for _ in 0..SCAN_STEPS {
        let t_next = t_prev + SCAN_STEP_DAYS;
        let f_next = f(t_next);
        if f_prev > 0.0 && f_next <= 0.0 {
            return SetResult::Event {
                jd_ut: bisect_crossing(&f, t_prev, t_next),
            };
        }
        ever_above |= f_next > 0.0;
        t_prev = t_next;
        f_prev = f_next;
    }

    if ever_above {
        SetResult::NeverSets
    } else {
        SetResult::NeverRises
    }
}

fn bisect_crossing<F>(f: &F, mut t_a: f64, mut t_b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    for _ in 0..BISECTION_ITERATIONS {
        let t_mid = 0.5 * (t_a + t_b);
        if f(t_mid) > 0.0 {
            t_a = t_mid;
        } else {
            t_b = t_mid;
        }
    }
    0.5 * (t_a + t_b)
}

/// Sunset (upper limb at the refracted horizon) on the evening of `date`.
pub fn sunset(date: NaiveDate, site: &ObservationSite) -> SetResult {
    let noon = approximate_local_noon_jd(jd_at_midnight(date), site.longitude_deg);
    find_setting(
        |jd| sky_snapshot(jd, site).sun_altitude_deg + SUNSET_DEPRESSION_DEG,
        noon,
    )
}

/// First moonset after local noon of `date` (topocentric upper limb, refracted).
pub fn moonset(date: NaiveDate, site: &ObservationSite) -> SetResult {
    let noon = approximate_local_noon_jd(jd_at_midnight(date), site.longitude_deg);
    find_setting(
        |jd| {
            let sky = sky_snapshot(jd, site);
            sky.moon_altitude_deg + HORIZON_REFRACTION_DEG + sky.moon_semidiameter_deg
        },
        noon,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn find_setting_linear() {
        // f crosses zero at start + 0.3 days
        let r = find_setting(|t| 0.3 - t, 0.0);
        let jd = r.jd_ut().unwrap();
        assert!((jd - 0.3).abs() < 1e-9, "jd {jd}");
    }

    #[test]
    fn find_setting_always_above() {
        assert_eq!(find_setting(|_| 1.0, 0.0), SetResult::NeverSets);
    }

    #[test]
    fn find_setting_always_below() {
        assert_eq!(find_setting(|_| -1.0, 0.0), SetResult::NeverRises);
    }

    #[test]
    fn find_setting_ignores_rising() {
        // Rises at 0.2, sets at 0.7
        let r = find_setting(|t| if (0.2..0.7).contains(&t) { 1.0 } else { -1.0 }, 0.0);
        let jd = r.jd_ut().unwrap();
        assert!((jd - 0.7).abs() < 1e-6);
    }

    #[test]
    fn noon_offset_by_longitude() {
        let noon = approximate_local_noon_jd(2_460_025.5, 90.0);
        assert!((noon - 2_460_025.75).abs() < 1e-12);
    }

    #[test]
    fn sunset_reference_site_march() {
        let site = ObservationSite::default();
        let jd = sunset(date(2023, 3, 22), &site).jd_ut().unwrap();
        let hours = (jd - 2_460_025.5) * 24.0;
        assert!((hours - 17.76).abs() < 0.1, "sunset at {hours} h UT");
    }

    #[test]
    fn polar_day_never_sets() {
        let site = ObservationSite::new(80.0, 0.0, 0.0).unwrap();
        assert_eq!(sunset(date(2023, 6, 21), &site), SetResult::NeverSets);
    }

    #[test]
    fn polar_night_never_rises() {
        let site = ObservationSite::new(80.0, 0.0, 0.0).unwrap();
        assert_eq!(sunset(date(2023, 12, 21), &site), SetResult::NeverRises);
    }

    #[test]
    fn moonset_follows_sunset_after_new_moon() {
        let site = ObservationSite::default();
        let d = date(2023, 3, 22);
        let ss = sunset(d, &site).jd_ut().unwrap();
        let ms = moonset(d, &site).jd_ut().unwrap();
        let lag = (ms - ss) * 1440.0;
        assert!(lag > 50.0 && lag < 70.0, "lag {lag} min");
    }
}
