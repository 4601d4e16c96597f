//! Error types for model loading and prediction.

use std::path::PathBuf;

/// Failure to load a model artifact. Fatal to the owning checker.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The artifact file does not exist.
    #[error("model artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The artifact could not be read.
    #[error("failed to read model artifact {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for the expected schema.
    #[error("corrupt model artifact: {source}")]
    Corrupt {
        #[source]
        source: serde_json::Error,
    },

    /// The artifact declares a format this build cannot read.
    #[error("unsupported model format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Feature names or order differ from the expected inputs.
    #[error("model features {found:?} do not match expected {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Coefficient vector length differs from the feature count.
    #[error("expected {expected} coefficients, found {found}")]
    CoefficientCount { expected: usize, found: usize },

    /// A numeric parameter is NaN or infinite, or out of range.
    #[error("invalid model parameter '{field}'")]
    InvalidParameter { field: &'static str },
}

/// Failure of a single prediction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ClassifierError {
    /// An input feature is NaN or infinite.
    #[error("non-finite input feature '{feature}'")]
    NonFiniteInput { feature: &'static str },

    /// The classifier produced a probability outside [0, 1] or NaN.
    #[error("classifier produced invalid probability {0}")]
    InvalidProbability(f64),

    /// The classifier produced a label other than 0 or 1.
    #[error("classifier produced invalid label {0}")]
    InvalidLabel(u8),

    /// Implementation-specific failure.
    #[error("classifier failed: {0}")]
    Failed(String),
}
