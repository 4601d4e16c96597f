//! Error types for the ephemeris layer.

use thiserror::Error;

/// Errors from ephemeris configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemError {
    /// Observation site failed validation.
    #[error("invalid observation site: {0}")]
    InvalidSite(&'static str),
}
