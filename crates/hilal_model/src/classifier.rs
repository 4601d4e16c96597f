//! Classifier contract.

use hilal_ephem::VisibilityFeatures;
use serde::Serialize;

use crate::error::ClassifierError;

/// Outcome of classifying one night.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibilityVerdict {
    label: u8,
    probability: f64,
}

impl VisibilityVerdict {
    /// Build a verdict; `label` must be 0 or 1 and `probability` in [0, 1].
    pub fn new(label: u8, probability: f64) -> Result<Self, ClassifierError> {
        if label > 1 {
            return Err(ClassifierError::InvalidLabel(label));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(ClassifierError::InvalidProbability(probability));
        }
        Ok(Self { label, probability })
    }

    /// 1 when the crescent is predicted visible.
    pub fn label(&self) -> u8 {
        self.label
    }

    /// Probability of the visible class.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn is_visible(&self) -> bool {
        self.label == 1
    }
}

/// Maps visibility features to a verdict.
///
/// Implementations are stateless after construction and shared across
/// threads without locking.
pub trait VisibilityClassifier: Send + Sync {
    fn predict(&self, features: &VisibilityFeatures) -> Result<VisibilityVerdict, ClassifierError>;
}

impl<C: VisibilityClassifier + ?Sized> VisibilityClassifier for std::sync::Arc<C> {
    fn predict(&self, features: &VisibilityFeatures) -> Result<VisibilityVerdict, ClassifierError> {
        (**self).predict(features)
    }
}

impl<C: VisibilityClassifier + ?Sized> VisibilityClassifier for Box<C> {
    fn predict(&self, features: &VisibilityFeatures) -> Result<VisibilityVerdict, ClassifierError> {
        (**self).predict(features)
    }
}
