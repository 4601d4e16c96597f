//! Logistic-regression visibility model loaded from a JSON artifact.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "hilal_visibility_logistic_v1",
//!   "features": ["arcv", "W_topo"],
//!   "intercept": -10.5,
//!   "coefficients": [1.5, 495.0],
//!   "decision_threshold": 0.5
//! }
//! ```
//!
//! `p = 1 / (1 + exp(-(intercept + Σ cᵢ·xᵢ)))`, label 1 when
//! `p >= decision_threshold`.

use std::path::Path;

use hilal_ephem::VisibilityFeatures;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::{VisibilityClassifier, VisibilityVerdict};
use crate::error::{ClassifierError, ModelError};

/// Artifact format this build reads.
pub const FORMAT_VERSION: u32 = 1;

/// Expected feature names, in input order.
pub const FEATURE_NAMES: [&str; 2] = ["arcv", "W_topo"];

/// On-disk representation of a logistic model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    pub features: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
}

fn default_decision_threshold() -> f64 {
    0.5
}

/// Validated logistic visibility model.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    name: String,
    intercept: f64,
    coefficients: [f64; 2],
    decision_threshold: f64,
}

impl LogisticModel {
    /// Load and validate an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&text)?;
        info!(path = %path.display(), name = %model.name, "loaded visibility model");
        Ok(model)
    }

    /// Parse and validate an artifact from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact =
            serde_json::from_str(text).map_err(|source| ModelError::Corrupt { source })?;
        Self::from_artifact(artifact)
    }

    /// Validate a deserialized artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: artifact.format_version,
                supported: FORMAT_VERSION,
            });
        }
        if artifact.features.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelError::FeatureMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                found: artifact.features,
            });
        }
        let coefficients: [f64; 2] =
            artifact
                .coefficients
                .as_slice()
                .try_into()
                .map_err(|_| ModelError::CoefficientCount {
                    expected: FEATURE_NAMES.len(),
                    found: artifact.coefficients.len(),
                })?;
        if !artifact.intercept.is_finite() {
            return Err(ModelError::InvalidParameter { field: "intercept" });
        }
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidParameter {
                field: "coefficients",
            });
        }
        if !(0.0..=1.0).contains(&artifact.decision_threshold) {
            return Err(ModelError::InvalidParameter {
                field: "decision_threshold",
            });
        }
        Ok(Self {
            name: artifact.name,
            intercept: artifact.intercept,
            coefficients,
            decision_threshold: artifact.decision_threshold,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }

    /// Visible-class probability for raw feature values.
    pub fn probability(&self, features: &VisibilityFeatures) -> f64 {
        let z = self.intercept
            + features
                .as_array()
                .iter()
                .zip(self.coefficients)
                .map(|(x, c)| x * c)
                .sum::<f64>();
        sigmoid(z)
    }
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl VisibilityClassifier for LogisticModel {
    fn predict(&self, features: &VisibilityFeatures) -> Result<VisibilityVerdict, ClassifierError> {
        for (value, feature) in features.as_array().into_iter().zip(FEATURE_NAMES) {
            if !value.is_finite() {
                return Err(ClassifierError::NonFiniteInput { feature });
            }
        }
        let p = self.probability(features);
        let label = u8::from(p >= self.decision_threshold);
        VisibilityVerdict::new(label, p)
    }
}
