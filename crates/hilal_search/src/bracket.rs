//! Two-tier confidence bracketing.
//!
//! The month is first resolved at the low tier. When that result's
//! probability lands in [low, high), a second, independent search at the
//! high tier is reported alongside it.

use hilal_ephem::FeatureProvider;
use hilal_model::VisibilityClassifier;
use tracing::debug;

use crate::config::ConfidenceTiers;
use crate::error::SearchError;
use crate::search::HilalSearch;
use crate::search_types::BracketResult;

impl<P, C> HilalSearch<P, C>
where
    P: FeatureProvider,
    C: VisibilityClassifier + ?Sized,
{
    /// Resolve a month at both confidence tiers.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_with_bracket(
        &self,
        hijri_year: i32,
        hijri_month_name: &str,
        tiers: &ConfidenceTiers,
    ) -> Result<BracketResult, SearchError> {
        tiers.validate().map_err(SearchError::InvalidConfig)?;
        let primary = self.search(hijri_year, hijri_month_name, tiers.low)?;
        let fallback = if tiers.is_ambiguous(primary.probability) {
            debug!(
                probability = primary.probability,
                high = tiers.high,
                "primary in ambiguous band, searching at high tier"
            );
            Some(self.search(hijri_year, hijri_month_name, tiers.high)?)
        } else {
            None
        };
        Ok(BracketResult { primary, fallback })
    }
}
