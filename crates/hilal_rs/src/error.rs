//! Unified error type for the convenience API.

use hilal_calendar::CalendarError;
use hilal_ephem::EphemError;
use hilal_model::ModelError;
use hilal_search::SearchError;

/// Errors from any layer beneath [`HilalChecker`](crate::HilalChecker).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HilalError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Site(#[from] EphemError),
}

impl HilalError {
    /// Calendar error, whether raised directly or through the search engine.
    pub fn as_calendar(&self) -> Option<&CalendarError> {
        match self {
            Self::Calendar(e) | Self::Search(SearchError::Calendar(e)) => Some(e),
            _ => None,
        }
    }
}
