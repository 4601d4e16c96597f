//! Crescent-based Hijri month start determination.
//!
//! - [`HilalSearch::search`]: bounded night-by-night search from the
//!   arithmetic anchor
//! - [`HilalSearch::resolve_with_bracket`]: low/high confidence tiers
//! - [`HilalSearch::generate_year`]: twelve independent month searches
//!
//! Feature extraction and classification are injected through the
//! [`FeatureProvider`](hilal_ephem::FeatureProvider) and
//! [`VisibilityClassifier`](hilal_model::VisibilityClassifier) traits.

pub mod bracket;
pub mod config;
pub mod error;
pub mod search;
pub mod search_types;
pub mod year_batch;

pub use config::{
    BatchMode, ConfidenceTiers, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD, MAX_ITERATIONS,
    MissingFeaturePolicy, SearchConfig,
};
pub use error::SearchError;
pub use search::{FIRST_DAY_OFFSET, HilalSearch, validate_threshold};
pub use search_types::{
    BracketResult, CandidateNight, MonthOutcome, SearchResult, YearBatch, YearBatchRow,
};
