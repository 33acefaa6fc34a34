//! TickerGrid Core — the alignment engine for heterogeneous financial
//! time series.
//!
//! Takes independently-updated datasets with different native update
//! frequencies (daily prices, quarterly/annual financials, irregular
//! filings, weekly executive snapshots, daily-bucketed news) and produces a
//! unified, gap-honest timeline:
//! - Domain types (observations, normalized series, dataset tags, values)
//! - Static sparsity policy (sparsest → densest: executives → filings →
//!   financials → news → prices)
//! - Reference index builder (daily calendar / sparse reference clock)
//! - Single-pass forward-fill merger
//! - Column catalog for self-describing output
//! - Dataset adapter boundary with graceful per-dataset degradation
//!
//! The engine never invents values: every non-null cell traces to a real
//! observation at or before its date.

pub mod adapter;
pub mod domain;
pub mod engine;
pub mod error;

pub use adapter::{gather_series, AdapterError, DatasetAdapter, GatherOutcome};
pub use domain::{
    DatasetTag, FieldSpec, NormalizedSeries, Observation, SeriesError, Value, ValueType,
};
pub use engine::{
    align, build_index, column_key, derive_columns, latest_values, merge, AlignedResponse,
    AlignedRow, AlignmentRequest, ColumnDescriptor, IndexMode, ReferenceIndex, ResponseMeta,
    SummaryEntry, NULL_NOTE,
};
pub use error::AlignError;
