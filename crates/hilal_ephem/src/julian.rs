//! Julian Date helpers and the TT−UT (ΔT) approximation.

use chrono::{Datelike, NaiveDate};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Date for a proleptic Gregorian calendar date with fractional day.
///
/// Standard Meeus algorithm (Astronomical Algorithms, ch. 7).
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (f64::from(y) / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (f64::from(y) + 4716.0)).floor() + (30.6001 * (f64::from(m) + 1.0)).floor()
        + day_frac
        + b
        - 1524.5
}

/// Julian Date of 00:00 UTC on a calendar date.
pub fn jd_at_midnight(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), f64::from(date.day()))
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Approximate decimal year of a Julian Date.
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000_JD) / 365.25
}

/// ΔT = TT − UT in seconds.
///
/// Espenak & Meeus polynomial fits for 1860–2150, long-term parabola outside.
pub fn delta_t_seconds(year: f64) -> f64 {
    if (1860.0..1900.0).contains(&year) {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251_754 * t.powi(2) + 0.016_806_68 * t.powi(3)
            - 0.000_447_362_4 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if (1900.0..1920.0).contains(&year) {
        let t = year - 1900.0;
        -2.79 + 1.494_119 * t - 0.059_893_9 * t.powi(2) + 0.006_196_6 * t.powi(3)
            - 0.000_197 * t.powi(4)
    } else if (1920.0..1941.0).contains(&year) {
        let t = year - 1920.0;
        21.20 + 0.844_93 * t - 0.076_100 * t.powi(2) + 0.002_093_6 * t.powi(3)
    } else if (1941.0..1961.0).contains(&year) {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if (1961.0..1986.0).contains(&year) {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if (1986.0..2005.0).contains(&year) {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060_374 * t.powi(2)
            + 0.001_727_5 * t.powi(3)
            + 0.000_651_814 * t.powi(4)
            + 0.000_023_735_99 * t.powi(5)
    } else if (2005.0..2050.0).contains(&year) {
        let t = year - 2000.0;
        62.92 + 0.322_17 * t + 0.005_589 * t.powi(2)
    } else if (2050.0..2150.0).contains(&year) {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

/// Convert a UT Julian Date to TT.
pub fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t_seconds(decimal_year(jd_ut)) / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_noon() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 October 4.81 = JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn midnight_is_half_day() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 22).unwrap();
        let jd = jd_at_midnight(d);
        assert!((jd.fract() - 0.5).abs() < 1e-9);
        assert!((jd - 2_460_025.5).abs() < 1e-9);
    }

    #[test]
    fn delta_t_2000() {
        assert!((delta_t_seconds(2000.0) - 63.86).abs() < 1e-9);
    }

    #[test]
    fn delta_t_continuous_at_2005() {
        let before = delta_t_seconds(2004.999_999);
        let after = delta_t_seconds(2005.0);
        assert!((before - after).abs() < 0.5, "{before} vs {after}");
    }

    #[test]
    fn delta_t_plausible_range() {
        for year in [1890.0, 1930.0, 1970.0, 2020.0, 2100.0] {
            let dt = delta_t_seconds(year);
            assert!(dt > -10.0 && dt < 300.0, "ΔT({year}) = {dt}");
        }
    }

    #[test]
    fn tt_ahead_of_ut() {
        let jd = 2_460_000.5;
        assert!(ut_to_tt(jd) > jd);
    }
}
