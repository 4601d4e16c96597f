//! Search, bracketing and batch configuration.

use hilal_ephem::ObservationSite;
use serde::{Deserialize, Serialize};

/// Upper bound on candidate nights evaluated by one search.
pub const MAX_ITERATIONS: u32 = 30;

/// Default lower confidence tier.
pub const DEFAULT_LOW_THRESHOLD: f64 = 0.8;

/// Default upper confidence tier; also the default search threshold.
pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.9;

/// What to do when visibility features cannot be computed for a night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFeaturePolicy {
    /// Advance to the next night; the night counts toward the iteration bound.
    #[default]
    Skip,
    /// Abort the search with `ParameterUnavailable`.
    FailFast,
}

/// Configuration for a crescent search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SearchConfig {
    /// Maximum candidate nights (default [`MAX_ITERATIONS`]).
    pub max_iterations: u32,
    /// Observation site passed to the feature provider.
    pub site: ObservationSite,
    /// Handling of nights without features.
    pub missing_features: MissingFeaturePolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            site: ObservationSite::default(),
            missing_features: MissingFeaturePolicy::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_site(mut self, site: ObservationSite) -> Self {
        self.site = site;
        self
    }

    pub fn with_missing_features(mut self, policy: MissingFeaturePolicy) -> Self {
        self.missing_features = policy;
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if self.max_iterations > MAX_ITERATIONS {
            return Err("max_iterations must not exceed 30");
        }
        self.site.validate()
    }
}

/// Two-tier confidence thresholds for bracketing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ConfidenceTiers {
    /// Primary threshold, probability in [0, 1].
    pub low: f64,
    /// Fallback threshold for ambiguous results, probability in [0, 1].
    pub high: f64,
}

impl Default for ConfidenceTiers {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

impl ConfidenceTiers {
    pub fn new(low: f64, high: f64) -> Result<Self, &'static str> {
        let tiers = Self { low, high };
        tiers.validate()?;
        Ok(tiers)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_probability(self.low) || !is_probability(self.high) {
            return Err("confidence tiers must be within [0, 1]");
        }
        if self.low > self.high {
            return Err("low tier must not exceed high tier");
        }
        Ok(())
    }

    /// Whether `p` falls in the ambiguous band [low, high).
    pub fn is_ambiguous(&self, p: f64) -> bool {
        self.low <= p && p < self.high
    }
}

/// Execution strategy for the 12 months of a year batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// One month after another.
    #[default]
    Sequential,
    /// Months evaluated on the rayon thread pool; output order is unchanged.
    Parallel,
}

pub(crate) fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}
