//! Search, bracketing and batch behavior with deterministic stubs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{Datelike, Days, NaiveDate};
use hilal_calendar::{HijriMonth, LunarEpochResolver};
use hilal_ephem::{FeatureProvider, VisibilityFeatures};
use hilal_model::{ClassifierError, VisibilityClassifier, VisibilityVerdict};
use hilal_search::{
    BatchMode, ConfidenceTiers, HilalSearch, MAX_ITERATIONS, MissingFeaturePolicy, SearchConfig,
    SearchError,
};

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

/// Encodes the night as its day number so classifiers can key on the date.
struct DayNumberProvider;

impl FeatureProvider for DayNumberProvider {
    fn compute_features(&self, date: NaiveDate, _: f64, _: f64) -> Option<VisibilityFeatures> {
        VisibilityFeatures::new(f64::from(date.num_days_from_ce()), 0.0)
    }
}

/// Never has features.
struct Unavailable;

impl FeatureProvider for Unavailable {
    fn compute_features(&self, _: NaiveDate, _: f64, _: f64) -> Option<VisibilityFeatures> {
        None
    }
}

/// Counts lookups; features come from [`DayNumberProvider`] when `available`.
struct Counting {
    calls: AtomicU32,
    available: bool,
}

impl Counting {
    fn new(available: bool) -> Self {
        Self {
            calls: AtomicU32::new(0),
            available,
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FeatureProvider for Counting {
    fn compute_features(&self, date: NaiveDate, lat: f64, lon: f64) -> Option<VisibilityFeatures> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.available {
            DayNumberProvider.compute_features(date, lat, lon)
        } else {
            None
        }
    }
}

/// Never visible.
struct NeverVisible;

impl VisibilityClassifier for NeverVisible {
    fn predict(&self, _: &VisibilityFeatures) -> Result<VisibilityVerdict, ClassifierError> {
        VisibilityVerdict::new(0, 0.1)
    }
}

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Verdict chosen by the night's offset from a fixed anchor.
struct ByOffset<F: Fn(i64) -> (u8, f64) + Send + Sync> {
    anchor: NaiveDate,
    rule: F,
}

impl<F: Fn(i64) -> (u8, f64) + Send + Sync> VisibilityClassifier for ByOffset<F> {
    fn predict(&self, f: &VisibilityFeatures) -> Result<VisibilityVerdict, ClassifierError> {
        let offset = (f.arcv_deg - day_number(self.anchor)) as i64;
        let (label, p) = (self.rule)(offset);
        VisibilityVerdict::new(label, p)
    }
}

/// Fails for any night inside [start, end], visible otherwise.
struct FailsBetween {
    start: f64,
    end: f64,
}

impl VisibilityClassifier for FailsBetween {
    fn predict(&self, f: &VisibilityFeatures) -> Result<VisibilityVerdict, ClassifierError> {
        if (self.start..=self.end).contains(&f.arcv_deg) {
            Err(ClassifierError::Failed("model rejected night".into()))
        } else {
            VisibilityVerdict::new(1, 0.95)
        }
    }
}

fn anchor(year: i32, month: &str) -> NaiveDate {
    LunarEpochResolver::default().anchor(year, month).unwrap()
}

fn add_days(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap()
}

fn by_offset<F>(year: i32, month: &str, rule: F) -> HilalSearch<DayNumberProvider, ByOffset<F>>
where
    F: Fn(i64) -> (u8, f64) + Send + Sync,
{
    let classifier = ByOffset {
        anchor: anchor(year, month),
        rule,
    };
    HilalSearch::new(DayNumberProvider, Arc::new(classifier), SearchConfig::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Search engine
// ---------------------------------------------------------------------------

#[test]
fn never_visible_exhausts_after_max_iterations() {
    let s = by_offset(1444, "Ramadan", |_| (0, 0.1));
    let e = s.search(1444, "Ramadan", 0.9).unwrap_err();
    assert_eq!(
        e,
        SearchError::SearchExhausted {
            iterations: MAX_ITERATIONS,
            last_probability: Some(0.1),
        }
    );
}

#[test]
fn exhaustion_evaluates_every_night() {
    let s = HilalSearch::new(Counting::new(true), Arc::new(NeverVisible), SearchConfig::default())
        .unwrap();
    let e = s.search(1444, "Ramadan", 0.9).unwrap_err();
    assert!(matches!(e, SearchError::SearchExhausted { .. }));
    assert_eq!(s.provider().calls(), MAX_ITERATIONS);
}

#[test]
fn skipped_nights_count_as_iterations() {
    let s = HilalSearch::new(Counting::new(false), Arc::new(NeverVisible), SearchConfig::default())
        .unwrap();
    let e = s.search(1444, "Ramadan", 0.9).unwrap_err();
    assert!(matches!(
        e,
        SearchError::SearchExhausted {
            last_probability: None,
            ..
        }
    ));
    assert_eq!(s.provider().calls(), MAX_ITERATIONS);
}

#[test]
fn smaller_iteration_budget_is_honored() {
    let config = SearchConfig {
        max_iterations: 7,
        ..SearchConfig::default()
    };
    let s = HilalSearch::new(Counting::new(true), Arc::new(NeverVisible), config).unwrap();
    let e = s.search(1445, "Shawwal", 0.9).unwrap_err();
    assert!(matches!(e, SearchError::SearchExhausted { iterations: 7, .. }));
    assert_eq!(s.provider().calls(), 7);
}

#[test]
fn visible_on_sixth_night_gives_anchor_plus_five() {
    // Iterations 0..=4 cover offsets -1..=3; iteration 5 is offset 4
    let s = by_offset(1444, "Ramadan", |o| if o >= 4 { (1, 0.95) } else { (0, 0.2) });
    let r = s.search(1444, "Ramadan", 0.9).unwrap();
    assert_eq!(r.date, add_days(anchor(1444, "Ramadan"), 5));
    assert_eq!(r.probability, 0.95);
    assert_eq!(r.nights_evaluated, 6);
    assert_eq!(r.night.day_offset, 4);
}

#[test]
fn result_is_day_after_winning_night() {
    let s = by_offset(1445, "Shawwal", |o| if o >= 1 { (1, 0.99) } else { (0, 0.0) });
    let r = s.search(1445, "Shawwal", 0.9).unwrap();
    assert_eq!(r.date, r.night.date.succ_opt().unwrap());
}

#[test]
fn visible_label_below_threshold_keeps_searching() {
    let s = by_offset(1444, "Ramadan", |o| if o >= 2 { (1, 0.93) } else { (1, 0.7) });
    let r = s.search(1444, "Ramadan", 0.9).unwrap();
    assert_eq!(r.night.day_offset, 2);
}

#[test]
fn high_probability_with_label_zero_is_not_success() {
    let s = by_offset(1444, "Ramadan", |o| if o >= 0 { (1, 0.91) } else { (0, 0.99) });
    let r = s.search(1444, "Ramadan", 0.9).unwrap();
    assert_eq!(r.night.day_offset, 0);
}

#[test]
fn searches_are_deterministic() {
    let s = by_offset(1444, "Dhu al-Hijjah", |o| if o >= 1 { (1, 0.97) } else { (0, 0.3) });
    let a = s.search(1444, "Dhu al-Hijjah", 0.9).unwrap();
    let b = s.search(1444, "Dhu al-Hijjah", 0.9).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.probability.to_bits(), b.probability.to_bits());
}

// ---------------------------------------------------------------------------
// Missing-feature policy
// ---------------------------------------------------------------------------

#[test]
fn skip_policy_exhausts_without_probability() {
    let s = HilalSearch::new(
        Unavailable,
        Arc::new(FailsBetween {
            start: 0.0,
            end: 0.0,
        }),
        SearchConfig::default(),
    )
    .unwrap();
    let e = s.search(1444, "Ramadan", 0.9).unwrap_err();
    assert_eq!(
        e,
        SearchError::SearchExhausted {
            iterations: MAX_ITERATIONS,
            last_probability: None,
        }
    );
}

#[test]
fn fail_fast_policy_reports_first_night() {
    let config = SearchConfig::default().with_missing_features(MissingFeaturePolicy::FailFast);
    let s = HilalSearch::new(
        Unavailable,
        Arc::new(FailsBetween {
            start: 0.0,
            end: 0.0,
        }),
        config,
    )
    .unwrap();
    let e = s.search(1444, "Ramadan", 0.9).unwrap_err();
    assert_eq!(
        e,
        SearchError::ParameterUnavailable {
            night: anchor(1444, "Ramadan").pred_opt().unwrap(),
            day_offset: -1,
        }
    );
}

// ---------------------------------------------------------------------------
// Bracketing
// ---------------------------------------------------------------------------

#[test]
fn bracket_ambiguous_primary_runs_fallback() {
    let s = by_offset(1444, "Ramadan", |o| if o >= 1 { (1, 0.95) } else { (1, 0.85) });
    let b = s
        .resolve_with_bracket(1444, "Ramadan", &ConfidenceTiers::default())
        .unwrap();
    let a = anchor(1444, "Ramadan");
    assert_eq!(b.primary.probability, 0.85);
    assert_eq!(b.primary.date, a);
    let fallback = b.fallback.expect("fallback expected for p in [0.8, 0.9)");
    assert_eq!(fallback.probability, 0.95);
    assert_eq!(fallback.date, add_days(a, 2));
}

#[test]
fn bracket_confident_primary_has_no_fallback() {
    let s = by_offset(1444, "Ramadan", |_| (1, 0.95));
    let b = s
        .resolve_with_bracket(1444, "Ramadan", &ConfidenceTiers::default())
        .unwrap();
    assert_eq!(b.primary.probability, 0.95);
    assert!(b.fallback.is_none());
}

#[test]
fn bracket_fallback_errors_propagate() {
    // Never reaches 0.9, so the fallback search exhausts
    let s = by_offset(1444, "Ramadan", |_| (1, 0.85));
    let e = s
        .resolve_with_bracket(1444, "Ramadan", &ConfidenceTiers::default())
        .unwrap_err();
    assert!(matches!(e, SearchError::SearchExhausted { .. }));
}

#[test]
fn bracket_rejects_inverted_tiers() {
    let s = by_offset(1444, "Ramadan", |_| (1, 0.95));
    let tiers = ConfidenceTiers {
        low: 0.95,
        high: 0.9,
    };
    let e = s.resolve_with_bracket(1444, "Ramadan", &tiers).unwrap_err();
    assert!(matches!(e, SearchError::InvalidConfig(_)));
}

// ---------------------------------------------------------------------------
// Year batch
// ---------------------------------------------------------------------------

fn ramadan_failing_engine() -> HilalSearch<DayNumberProvider, FailsBetween> {
    let start = anchor(1444, "Ramadan").pred_opt().unwrap();
    let end = add_days(start, 28);
    HilalSearch::new(
        DayNumberProvider,
        Arc::new(FailsBetween {
            start: day_number(start),
            end: day_number(end),
        }),
        SearchConfig::default(),
    )
    .unwrap()
}

#[test]
fn batch_isolates_failing_month() {
    let batch = ramadan_failing_engine().generate_year(1444, 0.9, BatchMode::Sequential);
    assert_eq!(batch.rows.len(), 12);
    assert_eq!(batch.resolved_count(), 11);
    assert_eq!(batch.failed_count(), 1);

    for (row, month) in batch.rows.iter().zip(hilal_calendar::ALL_HIJRI_MONTHS) {
        assert_eq!(row.month, month);
        assert_eq!(row.month_name, month.name());
    }

    let ramadan = &batch.rows[HijriMonth::Ramadan.index() as usize];
    let msg = ramadan.error().expect("Ramadan row should be an error");
    assert!(msg.contains("model rejected night"), "{msg}");
}

#[test]
fn batch_months_are_not_chained() {
    let batch = ramadan_failing_engine().generate_year(1444, 0.9, BatchMode::Sequential);
    for row in &batch.rows {
        if let Some(r) = row.result() {
            // Always visible outside Ramadan: each month resolves on its own anchor
            assert_eq!(r.date, anchor(1444, row.month_name));
        }
    }
}

#[test]
fn parallel_batch_matches_sequential() {
    let engine = ramadan_failing_engine();
    let seq = engine.generate_year(1444, 0.9, BatchMode::Sequential);
    let par = engine.generate_year(1444, 0.9, BatchMode::Parallel);
    assert_eq!(seq, par);
}

#[test]
fn batch_out_of_range_year_is_all_error_rows() {
    let batch = ramadan_failing_engine().generate_year(1299, 0.9, BatchMode::Sequential);
    assert_eq!(batch.failed_count(), 12);
    assert!(batch.rows[0].error().unwrap().contains("1299"));
}

#[test]
fn batch_serializes_to_json() {
    let batch = ramadan_failing_engine().generate_year(1444, 0.9, BatchMode::Sequential);
    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json["hijri_year"], 1444);
    assert_eq!(json["rows"][0]["month_name"], "Muharram");
    assert_eq!(json["rows"][8]["outcome"]["status"], "failed");
    assert_eq!(json["rows"][9]["outcome"]["status"], "resolved");
}
