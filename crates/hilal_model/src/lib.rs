//! Crescent visibility classification.
//!
//! - [`VisibilityClassifier`]: the contract the search engine consumes
//! - [`LogisticModel`]: default implementation, loaded once from a
//!   versioned JSON artifact and shared read-only

pub mod classifier;
pub mod error;
pub mod logistic;

pub use classifier::{VisibilityClassifier, VisibilityVerdict};
pub use error::{ClassifierError, ModelError};
pub use logistic::{FEATURE_NAMES, FORMAT_VERSION, LogisticModel, ModelArtifact};
