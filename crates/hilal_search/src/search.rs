//! Bounded night-by-night crescent search.
//!
//! Starting the evening before the month's arithmetic anchor, each
//! candidate night is scored by the feature provider and classifier. The
//! first night classified visible with probability at or above the
//! threshold ends the search; the month begins the following day.

use std::sync::Arc;

use hilal_calendar::{CalendarError, HijriMonthRef, LunarEpochResolver};
use hilal_ephem::FeatureProvider;
use hilal_model::VisibilityClassifier;
use tracing::{debug, info};

use crate::config::{MissingFeaturePolicy, SearchConfig, is_probability};
use crate::error::SearchError;
use crate::search_types::{CandidateNight, SearchResult};

/// Offset of the first candidate night relative to the anchor.
pub const FIRST_DAY_OFFSET: i32 = -1;

/// Crescent search engine.
///
/// Owns a feature provider and shares an already-loaded classifier. The
/// engine holds no mutable state; searches are independent and may run
/// concurrently.
pub struct HilalSearch<P, C: ?Sized> {
    resolver: LunarEpochResolver,
    provider: P,
    classifier: Arc<C>,
    config: SearchConfig,
}

impl<P, C: ?Sized> std::fmt::Debug for HilalSearch<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HilalSearch")
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P, C> HilalSearch<P, C>
where
    P: FeatureProvider,
    C: VisibilityClassifier + ?Sized,
{
    /// Create an engine with the tabular anchor resolver.
    pub fn new(provider: P, classifier: Arc<C>, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        Ok(Self {
            resolver: LunarEpochResolver::default(),
            provider,
            classifier,
            config,
        })
    }

    /// Replace the anchor resolver.
    pub fn with_resolver(mut self, resolver: LunarEpochResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn resolver(&self) -> &LunarEpochResolver {
        &self.resolver
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn classifier(&self) -> &Arc<C> {
        &self.classifier
    }

    /// First day of `hijri_month_name` in `hijri_year`.
    ///
    /// The threshold, month name and year are validated before any
    /// astronomical computation.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn search(
        &self,
        hijri_year: i32,
        hijri_month_name: &str,
        confidence_threshold: f64,
    ) -> Result<SearchResult, SearchError> {
        validate_threshold(confidence_threshold)?;
        let month = HijriMonthRef::new(hijri_year, hijri_month_name)?;
        self.search_month(month, confidence_threshold)
    }

    /// Search for an already-validated month reference.
    pub fn search_month(
        &self,
        month: HijriMonthRef,
        confidence_threshold: f64,
    ) -> Result<SearchResult, SearchError> {
        validate_threshold(confidence_threshold)?;
        let anchor = self.resolver.anchor_for(month)?;
        let site = self.config.site;
        let max_iterations = self.config.max_iterations;

        let mut day_offset = FIRST_DAY_OFFSET;
        let mut last_probability = None;
        let mut iterations = 0;

        while iterations < max_iterations {
            iterations += 1;
            let night = CandidateNight::at_offset(anchor, day_offset)
                .ok_or_else(|| out_of_range(month))?;

            let Some(features) =
                self.provider
                    .compute_features(night.date, site.latitude_deg, site.longitude_deg)
            else {
                match self.config.missing_features {
                    MissingFeaturePolicy::FailFast => {
                        return Err(SearchError::ParameterUnavailable {
                            night: night.date,
                            day_offset,
                        });
                    }
                    MissingFeaturePolicy::Skip => {
                        debug!(
                            month = %month_name(month),
                            night = %night.date,
                            day_offset,
                            "features unavailable, skipping"
                        );
                        day_offset += 1;
                        continue;
                    }
                }
            };

            let verdict = self
                .classifier
                .predict(&features)
                .map_err(|source| SearchError::Classifier {
                    night: night.date,
                    source,
                })?;
            debug!(
                night = %night.date,
                day_offset,
                arcv = features.arcv_deg,
                w_topo = features.w_topo_deg,
                label = verdict.label(),
                probability = verdict.probability(),
                "evaluated night"
            );
            last_probability = Some(verdict.probability());

            if verdict.is_visible() && verdict.probability() >= confidence_threshold {
                let date = night.next_day().ok_or_else(|| out_of_range(month))?;
                info!(
                    year = month.year(),
                    month = %month_name(month),
                    %date,
                    probability = verdict.probability(),
                    "month start resolved"
                );
                return Ok(SearchResult {
                    date,
                    probability: verdict.probability(),
                    night,
                    nights_evaluated: iterations,
                });
            }
            day_offset += 1;
        }

        Err(SearchError::SearchExhausted {
            iterations,
            last_probability,
        })
    }
}

/// Threshold must be a finite value in [0, 1].
pub fn validate_threshold(threshold: f64) -> Result<(), SearchError> {
    if is_probability(threshold) {
        Ok(())
    } else {
        Err(SearchError::InvalidThreshold(threshold))
    }
}

fn month_name(month: HijriMonthRef) -> &'static str {
    month.month().name()
}

fn out_of_range(month: HijriMonthRef) -> SearchError {
    SearchError::Calendar(CalendarError::DateOutOfRange {
        year: month.year(),
        month: month.month().number(),
        day: 1,
    })
}
