//! The alignment engine: request resolution, index building, forward-fill
//! merge, column catalog, and response assembly.
//!
//! Everything here is synchronous and stateless per request. Adapter I/O, if
//! any, happens before this module runs.

pub mod catalog;
pub mod index;
pub mod merge;
pub mod summary;

pub use catalog::{column_key, derive_columns, ColumnDescriptor};
pub use index::{build_index, IndexMode, ReferenceIndex};
pub use merge::{merge, AlignedRow};
pub use summary::{latest_values, SummaryEntry};

use crate::domain::{DatasetTag, NormalizedSeries};
use crate::error::AlignError;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Documented guarantee carried in every response payload.
pub const NULL_NOTE: &str =
    "Null values mean no data existed at or before that date. No values are fabricated.";

/// Default lookback when the caller gives no start date.
const DEFAULT_LOOKBACK_DAYS: i64 = 365;

/// Parameters of one alignment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentRequest {
    pub ticker: String,
    /// Defaults to one year before `end`.
    pub start: Option<NaiveDate>,
    /// Defaults to "today" as passed to [`AlignmentRequest::resolve_range`].
    pub end: Option<NaiveDate>,
    pub mode: IndexMode,
    /// Datasets to merge. `None` means all five. Filtering happens before
    /// index selection, so sparse mode falls back to the sparsest dataset
    /// among those actually included.
    pub include: Option<Vec<DatasetTag>>,
}

impl AlignmentRequest {
    /// A daily-mode request over the default range, all datasets included.
    pub fn new(ticker: &str) -> Self {
        AlignmentRequest {
            ticker: ticker.to_string(),
            start: None,
            end: None,
            mode: IndexMode::Daily,
            include: None,
        }
    }

    /// Apply range defaults against an injected "today" (kept out of the
    /// engine for deterministic tests) and validate.
    pub fn resolve_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), AlignError> {
        let end = self.end.unwrap_or(today);
        let start = self
            .start
            .unwrap_or_else(|| end - Duration::days(DEFAULT_LOOKBACK_DAYS));
        if start > end {
            return Err(AlignError::InvalidRange { start, end });
        }
        Ok((start, end))
    }

    /// The deduplicated set of tags this request merges, sparsest first.
    pub fn included_tags(&self) -> Vec<DatasetTag> {
        match &self.include {
            None => DatasetTag::ALL.to_vec(),
            // Filtering the fixed order dedupes and re-sorts the caller's
            // list in one step.
            Some(tags) => DatasetTag::ALL
                .iter()
                .copied()
                .filter(|t| tags.contains(t))
                .collect(),
        }
    }
}

/// Fixed explanatory metadata carried in every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub alignment_strategy: String,
    pub note: String,
}

impl ResponseMeta {
    fn for_mode(mode: IndexMode) -> Self {
        let alignment_strategy = match mode {
            IndexMode::Daily => "daily calendar index with forward-fill".to_string(),
            IndexMode::Sparse => "sparse reference clock (sparsest dataset)".to_string(),
        };
        ResponseMeta {
            alignment_strategy,
            note: NULL_NOTE.to_string(),
        }
    }
}

/// The full aligned payload handed to the API/UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignedResponse {
    pub ticker: String,
    pub mode: IndexMode,
    /// Range actually used, after defaults.
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sparse-mode reference dataset, if one was chosen.
    pub reference: Option<DatasetTag>,
    pub row_count: usize,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<AlignedRow>,
    pub meta: ResponseMeta,
}

/// Run the full alignment for one request.
///
/// `series` is whatever the adapters produced (missing datasets may simply be
/// absent, or present as empty series). `today` anchors the default range.
/// Only malformed requests fail; empty results are success with zero rows.
pub fn align(
    request: &AlignmentRequest,
    series: &[NormalizedSeries],
    today: NaiveDate,
) -> Result<AlignedResponse, AlignError> {
    let (start, end) = request.resolve_range(today)?;
    let included_tags = request.included_tags();

    let included: Vec<NormalizedSeries> = series
        .iter()
        .filter(|s| included_tags.contains(&s.tag()))
        .cloned()
        .collect();

    let index = build_index(request.mode, start, end, &included)?;
    let rows = merge(&index, &included);
    let columns = derive_columns(&included);

    Ok(AlignedResponse {
        ticker: request.ticker.to_uppercase(),
        mode: request.mode,
        start,
        end,
        reference: index.reference,
        row_count: rows.len(),
        columns,
        rows,
        meta: ResponseMeta::for_mode(request.mode),
    })
}
