//! Independent searches for all twelve months of a Hijri year.
//!
//! Each month starts from its own arithmetic anchor; resolved dates are
//! never chained into the next month. A failing month becomes an error row
//! and the rest of the batch proceeds.

use hilal_calendar::{ALL_HIJRI_MONTHS, HijriMonth, HijriMonthRef};
use hilal_ephem::FeatureProvider;
use hilal_model::VisibilityClassifier;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::BatchMode;
use crate::error::SearchError;
use crate::search::HilalSearch;
use crate::search_types::{MonthOutcome, YearBatch, YearBatchRow};

impl<P, C> HilalSearch<P, C>
where
    P: FeatureProvider,
    C: VisibilityClassifier + ?Sized,
{
    /// Resolve every month of `hijri_year` at `confidence_threshold`.
    ///
    /// Rows are always in canonical month order, whatever the mode.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate_year(
        &self,
        hijri_year: i32,
        confidence_threshold: f64,
        mode: BatchMode,
    ) -> YearBatch {
        let row = |&month: &HijriMonth| self.month_row(hijri_year, month, confidence_threshold);
        let rows: Vec<YearBatchRow> = match mode {
            BatchMode::Sequential => ALL_HIJRI_MONTHS.iter().map(row).collect(),
            BatchMode::Parallel => ALL_HIJRI_MONTHS.par_iter().map(row).collect(),
        };
        let batch = YearBatch { hijri_year, rows };
        info!(
            hijri_year,
            resolved = batch.resolved_count(),
            failed = batch.failed_count(),
            "year batch complete"
        );
        batch
    }

    fn month_row(&self, hijri_year: i32, month: HijriMonth, threshold: f64) -> YearBatchRow {
        let result = HijriMonthRef::from_month(hijri_year, month)
            .map_err(SearchError::from)
            .and_then(|month_ref| self.search_month(month_ref, threshold));
        let outcome = match result {
            Ok(r) => MonthOutcome::Resolved(r),
            Err(e) => {
                warn!(hijri_year, month = month.name(), error = %e, "month search failed");
                MonthOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        YearBatchRow {
            month,
            month_name: month.name(),
            outcome,
        }
    }
}
