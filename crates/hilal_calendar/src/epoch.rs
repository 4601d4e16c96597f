//! Theoretical anchor date for the first day of a Hijri month.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::month::HijriMonth;
use crate::tabular::{CalendarConverter, HijriDate, TabularIslamic};

/// Lowest accepted Hijri year.
pub const MIN_HIJRI_YEAR: i32 = 1300;

/// Highest accepted Hijri year.
pub const MAX_HIJRI_YEAR: i32 = 1600;

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HijriMonthRef {
    year: i32,
    month: HijriMonth,
}

impl HijriMonthRef {
    /// Validate a year and canonical month name.
    pub fn new(year: i32, month_name: &str) -> Result<Self, CalendarError> {
        let month = HijriMonth::from_name(month_name)?;
        Self::from_month(year, month)
    }

    /// Validate a year for an already-typed month.
    pub fn from_month(year: i32, month: HijriMonth) -> Result<Self, CalendarError> {
        validate_year(year)?;
        Ok(Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> HijriMonth {
        self.month
    }
}

/// Check that a Hijri year lies in [`MIN_HIJRI_YEAR`]..=[`MAX_HIJRI_YEAR`].
pub fn validate_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_HIJRI_YEAR..=MAX_HIJRI_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange {
            year,
            min: MIN_HIJRI_YEAR,
            max: MAX_HIJRI_YEAR,
        })
    }
}

/// Maps a Hijri month to its arithmetic day-1 Gregorian date.
///
/// The converter is shared behind an `Arc` so resolvers can be cloned into
/// worker threads cheaply.
#[derive(Clone)]
pub struct LunarEpochResolver {
    converter: Arc<dyn CalendarConverter>,
}

impl std::fmt::Debug for LunarEpochResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LunarEpochResolver").finish_non_exhaustive()
    }
}

impl Default for LunarEpochResolver {
    fn default() -> Self {
        Self::new(Arc::new(TabularIslamic))
    }
}

impl LunarEpochResolver {
    pub fn new(converter: Arc<dyn CalendarConverter>) -> Self {
        Self { converter }
    }

    /// Anchor for a year and canonical month name.
    ///
    /// Rejects unknown names with [`CalendarError::InvalidMonth`] before any
    /// conversion is attempted.
    pub fn anchor(&self, hijri_year: i32, hijri_month_name: &str) -> Result<NaiveDate, CalendarError> {
        let month_ref = HijriMonthRef::new(hijri_year, hijri_month_name)?;
        self.anchor_for(month_ref)
    }

    /// Anchor for an already-validated month reference.
    pub fn anchor_for(&self, month_ref: HijriMonthRef) -> Result<NaiveDate, CalendarError> {
        self.converter.to_gregorian(HijriDate {
            year: month_ref.year(),
            month: month_ref.month(),
            day: 1,
        })
    }
}
