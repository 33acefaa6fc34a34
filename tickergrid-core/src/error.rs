//! Request-level errors surfaced to the caller.
//!
//! Only malformed requests fail; data-availability gaps are represented as
//! null cells, never as errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors for malformed alignment requests. No partial results are produced.
#[derive(Debug, Error, PartialEq)]
pub enum AlignError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown dataset tag '{0}' (expected one of: executives, filings, financials, news, prices)")]
    UnknownDataset(String),
}
