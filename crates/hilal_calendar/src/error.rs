//! Error types for Hijri calendar lookups.

/// Errors from month validation and calendar conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Month name is not one of the 12 canonical names.
    #[error("invalid Hijri month name: {0:?}")]
    InvalidMonth(String),

    /// Hijri year outside the supported range.
    #[error("Hijri year {year} outside supported range {min}..={max}")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// Lowest accepted year.
        min: i32,
        /// Highest accepted year.
        max: i32,
    },

    /// Conversion produced a date the Gregorian type cannot represent.
    #[error("Gregorian date out of range for Hijri {year}-{month:02}-{day:02}")]
    DateOutOfRange {
        /// Hijri year.
        year: i32,
        /// Hijri month number.
        month: u8,
        /// Hijri day.
        day: u8,
    },
}
