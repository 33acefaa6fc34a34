//! Dataset adapter boundary.
//!
//! Adapters are the external collaborators that own fetching, caching, and
//! normalization. The engine only requires their output shape
//! (`NormalizedSeries`) and must keep working when one of them fails:
//! a failed adapter degrades to an empty series for that dataset, never to a
//! failed request.

use crate::domain::{DatasetTag, NormalizedSeries, SeriesError};
use chrono::NaiveDate;
use thiserror::Error;

/// Failures at the adapter boundary. Recovered locally by
/// [`gather_series`], not surfaced as request errors.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("dataset '{tag}' unavailable: {reason}")]
    Unavailable { tag: DatasetTag, reason: String },

    #[error("dataset '{tag}' produced a malformed series")]
    Malformed {
        tag: DatasetTag,
        #[source]
        source: SeriesError,
    },
}

/// One external data source, normalized.
///
/// Implementations must deliver date-sorted, de-duplicated output covering
/// the requested range plus enough history before `start` to resolve
/// forward-fill at the first reference date. Where a raw source can produce
/// multiple records per day (news), the adapter keeps the most recent record
/// per day to uphold the unique (date, field) invariant.
pub trait DatasetAdapter {
    /// Which of the five datasets this adapter produces.
    fn tag(&self) -> DatasetTag;

    /// Produce the normalized series for a ticker over `[start, end]`.
    fn series(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<NormalizedSeries, AdapterError>;
}

/// Result of collecting series from a set of adapters.
#[derive(Debug)]
pub struct GatherOutcome {
    /// One series per adapter; failed adapters appear as empty series.
    pub series: Vec<NormalizedSeries>,
    /// Which datasets degraded, and why — for the caller to report.
    pub degraded: Vec<AdapterError>,
}

/// Collect series from all adapters, degrading failures to empty series.
///
/// Partial data availability degrades gracefully: the aligned output keeps
/// every dataset that did arrive and shows all-null columns for those that
/// did not.
pub fn gather_series(
    adapters: &[&dyn DatasetAdapter],
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> GatherOutcome {
    let mut series = Vec::with_capacity(adapters.len());
    let mut degraded = Vec::new();

    for adapter in adapters {
        match adapter.series(ticker, start, end) {
            Ok(s) => series.push(s),
            Err(e) => {
                series.push(NormalizedSeries::empty(adapter.tag()));
                degraded.push(e);
            }
        }
    }

    GatherOutcome { series, degraded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldSpec, Observation};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct FixedAdapter {
        tag: DatasetTag,
    }

    impl DatasetAdapter for FixedAdapter {
        fn tag(&self) -> DatasetTag {
            self.tag
        }

        fn series(
            &self,
            _ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<NormalizedSeries, AdapterError> {
            NormalizedSeries::new(
                self.tag,
                vec![FieldSpec::number("x")],
                vec![Observation::new(d("2024-01-02"), "x", 1.0)],
            )
            .map_err(|source| AdapterError::Malformed {
                tag: self.tag,
                source,
            })
        }
    }

    struct BrokenAdapter {
        tag: DatasetTag,
    }

    impl DatasetAdapter for BrokenAdapter {
        fn tag(&self) -> DatasetTag {
            self.tag
        }

        fn series(
            &self,
            _ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<NormalizedSeries, AdapterError> {
            Err(AdapterError::Unavailable {
                tag: self.tag,
                reason: "connection refused".into(),
            })
        }
    }

    #[test]
    fn failed_adapter_degrades_to_empty_series() {
        let prices = FixedAdapter {
            tag: DatasetTag::Prices,
        };
        let execs = BrokenAdapter {
            tag: DatasetTag::Executives,
        };
        let outcome = gather_series(
            &[&prices, &execs],
            "AAPL",
            d("2024-01-01"),
            d("2024-12-31"),
        );

        assert_eq!(outcome.series.len(), 2);
        assert_eq!(outcome.degraded.len(), 1);
        let exec_series = outcome
            .series
            .iter()
            .find(|s| s.tag() == DatasetTag::Executives)
            .unwrap();
        assert!(exec_series.is_empty());
        assert!(exec_series.fields().is_empty());
    }

    #[test]
    fn all_adapters_healthy_means_no_degradation() {
        let prices = FixedAdapter {
            tag: DatasetTag::Prices,
        };
        let outcome = gather_series(&[&prices], "AAPL", d("2024-01-01"), d("2024-12-31"));
        assert!(outcome.degraded.is_empty());
        assert_eq!(outcome.series.len(), 1);
    }
}
