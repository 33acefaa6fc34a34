//! Property tests for alignment invariants.
//!
//! Uses proptest to verify:
//! 1. Forward-fill correctness — every emitted cell equals the latest
//!    observation at or before its date (checked against a naive
//!    quadratic reference implementation)
//! 2. No fabrication — every non-null value exists in some input series
//! 3. Determinism — repeated runs serialize byte-identically
//! 4. Daily index completeness — contiguous, inclusive, right length
//! 5. Sparse index subset — every index date is a real observation date of
//!    the chosen reference dataset, and the reference is the lowest-ranked
//!    dataset with in-range data

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tickergrid_core::{
    align, build_index, column_key, AlignmentRequest, DatasetTag, FieldSpec, IndexMode,
    NormalizedSeries, Observation, Value,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

// ── Strategies ───────────────────────────────────────────────────────

/// Sorted, de-duplicated day offsets inside a 120-day window.
fn arb_day_offsets(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(0i64..120, 0..max_len)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

fn arb_series(tag: DatasetTag, field: &'static str) -> impl Strategy<Value = NormalizedSeries> {
    arb_day_offsets(30).prop_map(move |offsets| {
        let observations = offsets
            .iter()
            .map(|&off| {
                Observation::new(base_date() + Duration::days(off), field, off as f64 + 0.5)
            })
            .collect();
        NormalizedSeries::new(tag, vec![FieldSpec::number(field)], observations).unwrap()
    })
}

fn arb_universe() -> impl Strategy<Value = Vec<NormalizedSeries>> {
    (
        arb_series(DatasetTag::Executives, "exec_count"),
        arb_series(DatasetTag::Filings, "filing_count"),
        arb_series(DatasetTag::Financials, "revenue_b"),
        arb_series(DatasetTag::News, "news_count"),
        arb_series(DatasetTag::Prices, "price_close"),
    )
        .prop_map(|(a, b, c, d, e)| vec![a, b, c, d, e])
}

fn arb_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..120, 0i64..120).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        (
            base_date() + Duration::days(lo),
            base_date() + Duration::days(hi),
        )
    })
}

/// Naive reference: latest observation of `field` at or before `date`.
fn naive_fill(series: &NormalizedSeries, field: &str, date: NaiveDate) -> Option<Value> {
    series
        .observations()
        .iter()
        .filter(|o| o.field == field && o.date <= date)
        .last()
        .map(|o| o.value.clone())
}

fn request(mode: IndexMode, start: NaiveDate, end: NaiveDate) -> AlignmentRequest {
    let mut req = AlignmentRequest::new("TEST");
    req.mode = mode;
    req.start = Some(start);
    req.end = Some(end);
    req
}

proptest! {
    /// Every emitted cell equals the naive quadratic forward-fill result.
    #[test]
    fn forward_fill_matches_naive_reference(
        universe in arb_universe(),
        (start, end) in arb_range(),
        mode in prop_oneof![Just(IndexMode::Daily), Just(IndexMode::Sparse)],
    ) {
        let response = align(&request(mode, start, end), &universe, end).unwrap();
        for row in &response.rows {
            for series in &universe {
                for spec in series.fields() {
                    let key = column_key(series.tag(), &spec.name);
                    let expected = naive_fill(series, &spec.name, row.date);
                    prop_assert_eq!(
                        row.cells.get(&key).cloned().flatten(),
                        expected,
                        "mismatch for {} at {}", key, row.date
                    );
                }
            }
        }
    }

    /// Every non-null value in the output exists somewhere in the input.
    #[test]
    fn no_fabrication(
        universe in arb_universe(),
        (start, end) in arb_range(),
    ) {
        let response = align(&request(IndexMode::Daily, start, end), &universe, end).unwrap();
        for row in &response.rows {
            for (key, cell) in &row.cells {
                if let Some(value) = cell {
                    let found = universe.iter().any(|s| {
                        s.observations().iter().any(|o| {
                            column_key(s.tag(), &o.field) == *key && &o.value == value
                        })
                    });
                    prop_assert!(found, "fabricated value in column {} at {}", key, row.date);
                }
            }
        }
    }

    /// Re-running alignment yields byte-identical serialized output.
    #[test]
    fn alignment_is_deterministic(
        universe in arb_universe(),
        (start, end) in arb_range(),
        mode in prop_oneof![Just(IndexMode::Daily), Just(IndexMode::Sparse)],
    ) {
        let req = request(mode, start, end);
        let a = serde_json::to_string(&align(&req, &universe, end).unwrap()).unwrap();
        let b = serde_json::to_string(&align(&req, &universe, end).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Daily index: contiguous calendar days, inclusive of both endpoints.
    #[test]
    fn daily_index_is_complete((start, end) in arb_range()) {
        let index = build_index(IndexMode::Daily, start, end, &[]).unwrap();
        let expected_len = (end - start).num_days() as usize + 1;
        prop_assert_eq!(index.dates.len(), expected_len);
        prop_assert_eq!(index.dates.first(), Some(&start));
        prop_assert_eq!(index.dates.last(), Some(&end));
        for pair in index.dates.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    /// Sparse index: every date is a real observation of the chosen
    /// reference, and the reference is the lowest-ranked dataset with any
    /// in-range observation.
    #[test]
    fn sparse_index_is_a_subset_of_the_reference(
        universe in arb_universe(),
        (start, end) in arb_range(),
    ) {
        let index = build_index(IndexMode::Sparse, start, end, &universe).unwrap();

        let expected_reference = universe
            .iter()
            .filter(|s| s.has_observation_in(start, end))
            .min_by_key(|s| s.tag().rank())
            .map(|s| s.tag());
        prop_assert_eq!(index.reference, expected_reference);

        match index.reference {
            None => prop_assert!(index.dates.is_empty()),
            Some(tag) => {
                let reference = universe.iter().find(|s| s.tag() == tag).unwrap();
                for date in &index.dates {
                    prop_assert!(*date >= start && *date <= end);
                    prop_assert!(
                        reference.observations().iter().any(|o| o.date == *date),
                        "index date {} has no real observation in {}", date, tag
                    );
                }
                for pair in index.dates.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }
    }
}
