//! Result types for crescent searches.

use chrono::{Datelike, Days, NaiveDate};
use hilal_calendar::HijriMonth;
use serde::Serialize;

/// A night on which the crescent is looked for.
///
/// `date` is the Gregorian civil date at 00:00 UTC whose evening is
/// observed; `day_offset` is relative to the month's arithmetic anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CandidateNight {
    pub date: NaiveDate,
    pub day_offset: i32,
}

impl CandidateNight {
    /// Night `day_offset` days from `anchor`, or `None` past chrono's range.
    pub fn at_offset(anchor: NaiveDate, day_offset: i32) -> Option<Self> {
        let magnitude = Days::new(u64::from(day_offset.unsigned_abs()));
        let date = if day_offset >= 0 {
            anchor.checked_add_days(magnitude)
        } else {
            anchor.checked_sub_days(magnitude)
        }?;
        Some(Self { date, day_offset })
    }

    /// The civil day that begins after this night's sighting.
    pub fn next_day(&self) -> Option<NaiveDate> {
        self.date.succ_opt()
    }
}

/// A resolved month start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchResult {
    /// First day of the Hijri month (Gregorian).
    pub date: NaiveDate,
    /// Visible-class probability on the sighting night.
    pub probability: f64,
    /// The night on which the crescent was judged visible.
    pub night: CandidateNight,
    /// Nights evaluated, including the winning one.
    pub nights_evaluated: u32,
}

impl SearchResult {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Result of resolving one month at two confidence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BracketResult {
    /// Search at the low tier.
    pub primary: SearchResult,
    /// Independent search at the high tier, present only when the primary
    /// probability is in [low, high).
    pub fallback: Option<SearchResult>,
}

/// Outcome for one month of a year batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MonthOutcome {
    Resolved(SearchResult),
    Failed { error: String },
}

/// One row of a year batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBatchRow {
    pub month: HijriMonth,
    pub month_name: &'static str,
    pub outcome: MonthOutcome,
}

impl YearBatchRow {
    pub fn result(&self) -> Option<&SearchResult> {
        match &self.outcome {
            MonthOutcome::Resolved(r) => Some(r),
            MonthOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            MonthOutcome::Resolved(_) => None,
            MonthOutcome::Failed { error } => Some(error),
        }
    }
}

/// All 12 months of a Hijri year, in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBatch {
    pub hijri_year: i32,
    pub rows: Vec<YearBatchRow>,
}

impl YearBatch {
    pub fn resolved_count(&self) -> usize {
        self.rows.iter().filter(|r| r.result().is_some()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.rows.len() - self.resolved_count()
    }
}
