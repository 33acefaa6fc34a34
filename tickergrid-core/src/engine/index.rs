//! Reference index construction.
//!
//! Two modes serve two consumer needs: a gap-free calendar for charting
//! (daily, where nulls mean "still waiting for an update") and a compact
//! table of only the moments something actually happened (sparse, where
//! every row is informative in the reference dataset).

use crate::domain::{DatasetTag, NormalizedSeries};
use crate::error::AlignError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the output's date axis is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Every calendar day in the requested range.
    Daily,
    /// Only the dates where the sparsest in-range dataset has a real
    /// observation.
    Sparse,
}

/// The ordered set of dates the aligned output is keyed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceIndex {
    /// Strictly increasing dates within the requested range.
    pub dates: Vec<NaiveDate>,
    /// The dataset whose observation dates define the index in sparse mode.
    /// `None` in daily mode or when no dataset has in-range data.
    pub reference: Option<DatasetTag>,
}

impl ReferenceIndex {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Build the reference index for `[start, end]` over the provided series.
///
/// Daily mode always yields a non-empty index for a valid range. Sparse mode
/// picks the lowest-ranked dataset with at least one in-range observation and
/// uses exactly its distinct in-range dates; if no dataset has in-range data,
/// the index is empty — a "no data in range" success, not a failure.
pub fn build_index(
    mode: IndexMode,
    start: NaiveDate,
    end: NaiveDate,
    series: &[NormalizedSeries],
) -> Result<ReferenceIndex, AlignError> {
    if start > end {
        return Err(AlignError::InvalidRange { start, end });
    }

    match mode {
        IndexMode::Daily => {
            let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
            Ok(ReferenceIndex {
                dates,
                reference: None,
            })
        }
        IndexMode::Sparse => {
            // Lowest rank wins; series order must not matter.
            let reference = series
                .iter()
                .filter(|s| s.has_observation_in(start, end))
                .min_by_key(|s| s.tag().rank());

            match reference {
                Some(reference) => Ok(ReferenceIndex {
                    dates: reference.dates_in(start, end),
                    reference: Some(reference.tag()),
                }),
                None => Ok(ReferenceIndex {
                    dates: Vec::new(),
                    reference: None,
                }),
            }
        }
    }
}
