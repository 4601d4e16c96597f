//! High-level checker owning a loaded model and a configured search engine.

use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use hilal_calendar::validate_year;
use hilal_ephem::{FeatureProvider, OdehProvider};
use hilal_model::{LogisticModel, VisibilityClassifier};
use hilal_search::{
    BatchMode, BracketResult, ConfidenceTiers, HilalSearch, MonthOutcome, SearchConfig,
    SearchResult, YearBatch,
};
use serde::Serialize;
use tracing::info;

use crate::error::HilalError;

/// Label used in place of a date for months that could not be resolved.
pub const ERROR_DATE: &str = "Error";

/// Engine type held by [`HilalChecker`].
pub type DynSearch = HilalSearch<Box<dyn FeatureProvider>, dyn VisibilityClassifier>;

/// Tunable behavior of a [`HilalChecker`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CheckerSettings {
    pub search: SearchConfig,
    pub tiers: ConfidenceTiers,
    pub batch_mode: BatchMode,
}

impl CheckerSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        self.search.validate()?;
        self.tiers.validate()
    }
}

/// First day of a Hijri month as a Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FirstDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub probability: f64,
}

impl FirstDay {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<&SearchResult> for FirstDay {
    fn from(r: &SearchResult) -> Self {
        Self {
            year: r.date.year(),
            month: r.date.month(),
            day: r.date.day(),
            probability: r.probability,
        }
    }
}

/// Month start at both confidence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BracketedFirstDay {
    pub primary: FirstDay,
    pub fallback: Option<FirstDay>,
}

impl From<&BracketResult> for BracketedFirstDay {
    fn from(b: &BracketResult) -> Self {
        Self {
            primary: FirstDay::from(&b.primary),
            fallback: b.fallback.as_ref().map(FirstDay::from),
        }
    }
}

/// One month of a yearly prediction table.
///
/// `date` is `YYYY-MM-DD` or [`ERROR_DATE`]; `confidence_or_message` holds
/// the probability (4 decimals) or the error description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRow {
    pub month_name: &'static str,
    pub date: String,
    pub confidence_or_message: String,
}

impl PredictionRow {
    pub fn is_error(&self) -> bool {
        self.date == ERROR_DATE
    }
}

/// Crescent checker for a site, backed by a loaded classifier.
///
/// The classifier is loaded once at construction and shared by every
/// subsequent call.
#[derive(Debug)]
pub struct HilalChecker {
    search: DynSearch,
    tiers: ConfidenceTiers,
    batch_mode: BatchMode,
}

impl HilalChecker {
    /// Load the logistic model at `path` and use default settings.
    pub fn from_model_path(path: impl AsRef<Path>) -> Result<Self, HilalError> {
        Self::from_model_path_with(path, CheckerSettings::default())
    }

    /// Load the logistic model at `path` with explicit settings.
    pub fn from_model_path_with(
        path: impl AsRef<Path>,
        settings: CheckerSettings,
    ) -> Result<Self, HilalError> {
        let model = LogisticModel::load(path)?;
        let provider = OdehProvider::for_site(&settings.search.site)?;
        Self::with_parts(Box::new(provider), Arc::new(model), settings)
    }

    /// Assemble from an arbitrary provider and classifier.
    pub fn with_parts(
        provider: Box<dyn FeatureProvider>,
        classifier: Arc<dyn VisibilityClassifier>,
        settings: CheckerSettings,
    ) -> Result<Self, HilalError> {
        settings
            .tiers
            .validate()
            .map_err(hilal_search::SearchError::InvalidConfig)?;
        let search = HilalSearch::new(provider, classifier, settings.search)?;
        Ok(Self {
            search,
            tiers: settings.tiers,
            batch_mode: settings.batch_mode,
        })
    }

    pub fn engine(&self) -> &DynSearch {
        &self.search
    }

    pub fn tiers(&self) -> &ConfidenceTiers {
        &self.tiers
    }

    /// First day of a month at the high confidence tier (0.9 by default).
    pub fn determine_first_day(
        &self,
        hijri_year: i32,
        hijri_month_name: &str,
    ) -> Result<FirstDay, HilalError> {
        self.determine_first_day_with_threshold(hijri_year, hijri_month_name, self.tiers.high)
    }

    /// First day of a month at an explicit confidence threshold.
    pub fn determine_first_day_with_threshold(
        &self,
        hijri_year: i32,
        hijri_month_name: &str,
        confidence_threshold: f64,
    ) -> Result<FirstDay, HilalError> {
        let r = self
            .search
            .search(hijri_year, hijri_month_name, confidence_threshold)?;
        Ok(FirstDay::from(&r))
    }

    /// First day at the low tier, plus the high-tier date when ambiguous.
    pub fn determine_first_day_with_bracket(
        &self,
        hijri_year: i32,
        hijri_month_name: &str,
    ) -> Result<BracketedFirstDay, HilalError> {
        let b = self
            .search
            .resolve_with_bracket(hijri_year, hijri_month_name, &self.tiers)?;
        Ok(BracketedFirstDay::from(&b))
    }

    /// Full year batch at the high tier.
    pub fn year_batch(&self, hijri_year: i32) -> Result<YearBatch, HilalError> {
        validate_year(hijri_year)?;
        Ok(self
            .search
            .generate_year(hijri_year, self.tiers.high, self.batch_mode))
    }

    /// Twelve table rows for a year, in canonical month order.
    pub fn generate_predictions_for_year(
        &self,
        hijri_year: i32,
    ) -> Result<Vec<PredictionRow>, HilalError> {
        let batch = self.year_batch(hijri_year)?;
        info!(hijri_year, failed = batch.failed_count(), "predictions generated");
        Ok(batch.rows.iter().map(prediction_row).collect())
    }
}

fn prediction_row(row: &hilal_search::YearBatchRow) -> PredictionRow {
    let (date, confidence_or_message) = match &row.outcome {
        MonthOutcome::Resolved(r) => (r.date.to_string(), format!("{:.4}", r.probability)),
        MonthOutcome::Failed { error } => (ERROR_DATE.to_string(), error.clone()),
    };
    PredictionRow {
        month_name: row.month_name,
        date,
        confidence_or_message,
    }
}
