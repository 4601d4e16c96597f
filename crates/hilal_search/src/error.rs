//! Error types for crescent searches.

use chrono::NaiveDate;
use hilal_calendar::CalendarError;
use hilal_model::ClassifierError;

/// Errors from the search engine, bracketing policy and batch generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Invalid month name, year out of range or unrepresentable anchor.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Features unavailable for a night under the fail-fast policy.
    #[error("astronomical parameters unavailable for night {night} (day offset {day_offset})")]
    ParameterUnavailable { night: NaiveDate, day_offset: i32 },

    /// No night satisfied the threshold within the iteration bound.
    #[error("no visible crescent within {iterations} nights{}", fmt_last(.last_probability))]
    SearchExhausted {
        iterations: u32,
        last_probability: Option<f64>,
    },

    /// The classifier failed for a night.
    #[error("classifier failed for night {night}: {source}")]
    Classifier {
        night: NaiveDate,
        #[source]
        source: ClassifierError,
    },

    /// Confidence threshold not a finite value in [0, 1].
    #[error("confidence threshold {0} must be within [0, 1]")]
    InvalidThreshold(f64),

    /// Rejected configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

fn fmt_last(p: &Option<f64>) -> String {
    match p {
        Some(p) => format!(" (last probability {p:.3})"),
        None => String::new(),
    }
}
