//! Proleptic arithmetic (tabular) Hijri calendar.
//!
//! Civil epoch: 1 Muharram 1 AH = Julian 622-07-16 = JDN 1948440.
//! Thirty-year cycle with leap years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29,
//! in which Dhu al-Hijjah has 30 days instead of 29. Odd months have 30 days,
//! even months 29.
//!
//! This calendar is computed, not observed: it supplies the theoretical anchor
//! from which the crescent search starts.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::month::HijriMonth;

/// Julian Day Number of 1 Muharram 1 AH (civil epoch).
pub const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Offset between JDN and chrono's day count from 0001-01-01 (day 1).
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Length of one 30-year cycle in days.
const CYCLE_DAYS: i64 = 10_631;

/// A day in the Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HijriDate {
    pub year: i32,
    pub month: HijriMonth,
    pub day: u8,
}

/// Hijri to Gregorian conversion capability.
///
/// The search only needs the forward direction; implementations backed by
/// observational tables can be swapped in without touching the resolver.
pub trait CalendarConverter: Send + Sync {
    /// Gregorian date for the given Hijri day.
    fn to_gregorian(&self, date: HijriDate) -> Result<NaiveDate, CalendarError>;
}

/// The arithmetic Hijri calendar with the civil epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabularIslamic;

/// Whether `year` is a 355-day year in the 30-year cycle.
pub fn is_leap_year(year: i32) -> bool {
    (14 + 11 * i64::from(year)).rem_euclid(30) < 11
}

/// Number of days in a Hijri month.
pub fn month_length(year: i32, month: HijriMonth) -> u8 {
    if month == HijriMonth::DhuAlHijjah {
        if is_leap_year(year) { 30 } else { 29 }
    } else if month.number() % 2 == 1 {
        30
    } else {
        29
    }
}

/// Julian Day Number of a Hijri date.
pub fn hijri_to_jdn(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year);
    let m = i64::from(month);
    // ceil(29.5 * (m - 1)) days precede month m
    let month_days = (59 * (m - 1) + 1).div_euclid(2);
    i64::from(day) + month_days + (y - 1) * 354 + (3 + 11 * y).div_euclid(30) + HIJRI_EPOCH_JDN
        - 1
}

/// Hijri date containing the given Julian Day Number.
pub fn jdn_to_hijri(jdn: i64) -> (i32, u8, u8) {
    let year = (30 * (jdn - HIJRI_EPOCH_JDN) + 10_646).div_euclid(CYCLE_DAYS);
    let year_start = hijri_to_jdn(year as i32, 1, 1);
    // ceil((jdn - year_start - 29) / 29.5) + 1
    let twice = 2 * (jdn - year_start - 29);
    let month = (-(-twice).div_euclid(59) + 1).min(12);
    let month_start = hijri_to_jdn(year as i32, month as u8, 1);
    let day = jdn - month_start + 1;
    (year as i32, month as u8, day as u8)
}

/// Gregorian calendar date for a Julian Day Number.
pub fn jdn_to_gregorian(jdn: i64) -> Option<NaiveDate> {
    let days = i32::try_from(jdn - JDN_CE_OFFSET).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

/// Julian Day Number of a Gregorian calendar date.
pub fn gregorian_to_jdn(date: NaiveDate) -> i64 {
    i64::from(chrono::Datelike::num_days_from_ce(&date)) + JDN_CE_OFFSET
}

impl TabularIslamic {
    /// Hijri date for a Gregorian date.
    pub fn from_gregorian(&self, date: NaiveDate) -> HijriDate {
        let (year, month, day) = jdn_to_hijri(gregorian_to_jdn(date));
        HijriDate {
            year,
            // jdn_to_hijri clamps the month to 1..=12
            month: HijriMonth::from_number(month).unwrap_or(HijriMonth::DhuAlHijjah),
            day,
        }
    }
}

impl CalendarConverter for TabularIslamic {
    fn to_gregorian(&self, date: HijriDate) -> Result<NaiveDate, CalendarError> {
        let out_of_range = || CalendarError::DateOutOfRange {
            year: date.year,
            month: date.month.number(),
            day: date.day,
        };
        if date.day == 0 || date.day > month_length(date.year, date.month) {
            return Err(out_of_range());
        }
        let jdn = hijri_to_jdn(date.year, date.month.number(), date.day);
        jdn_to_gregorian(jdn).ok_or_else(out_of_range)
    }
}
