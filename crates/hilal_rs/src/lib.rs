//! Convenience API for crescent-based Hijri month starts.
//!
//! Wraps the calendar, ephemeris, model and search crates behind a single
//! [`HilalChecker`] that loads its visibility model once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use hilal_rs::*;
//!
//! let checker = HilalChecker::from_model_path("models/hilal_visibility_v1.json")?;
//! let day = checker.determine_first_day(1445, "Ramadan")?;
//! println!("{}-{:02}-{:02} (p = {:.3})", day.year, day.month, day.day, day.probability);
//! ```

pub mod checker;
pub mod error;

pub use checker::{
    BracketedFirstDay, CheckerSettings, DynSearch, ERROR_DATE, FirstDay, HilalChecker,
    PredictionRow,
};
pub use error::HilalError;

// Re-export the types callers need to configure a checker.
pub use hilal_calendar::{ALL_HIJRI_MONTHS, HijriMonth, LunarEpochResolver};
pub use hilal_ephem::{
    CrescentGeometry, FeatureProvider, ObservationSite, OdehProvider, VisibilityFeatures,
};
pub use hilal_model::{LogisticModel, VisibilityClassifier, VisibilityVerdict};
pub use hilal_search::{BatchMode, ConfidenceTiers, MissingFeaturePolicy, SearchConfig};
