//! Hijri calendar support for crescent-based month determination.
//!
//! This crate provides:
//! - The 12 canonical Hijri month names with exact-match parsing
//! - The proleptic arithmetic (tabular) Hijri calendar
//! - [`LunarEpochResolver`], mapping (year, month) to the theoretical
//!   Gregorian date of day 1, the starting point of the crescent search

pub mod epoch;
pub mod error;
pub mod month;
pub mod tabular;

pub use epoch::{HijriMonthRef, LunarEpochResolver, MAX_HIJRI_YEAR, MIN_HIJRI_YEAR, validate_year};
pub use error::CalendarError;
pub use month::{ALL_HIJRI_MONTHS, HijriMonth};
pub use tabular::{
    CalendarConverter, HIJRI_EPOCH_JDN, HijriDate, TabularIslamic, gregorian_to_jdn,
    hijri_to_jdn, is_leap_year, jdn_to_gregorian, jdn_to_hijri, month_length,
};
