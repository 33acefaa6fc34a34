//! JSON snapshot adapter: one file per ticker and dataset.
//!
//! Plays the "external collaborator" role against the engine. Snapshots are
//! whatever an ingestion layer last wrote to disk, named
//! `{TICKER}_{dataset}.json`:
//!
//! ```json
//! {
//!   "ticker": "AAPL",
//!   "dataset": "prices",
//!   "fields": [{ "name": "price_close", "type": "number" }],
//!   "observations": [
//!     { "date": "2024-01-02", "field": "price_close", "value": 185.2 }
//!   ]
//! }
//! ```
//!
//! The adapter owns the contract the engine relies on: it sorts observations
//! by date (stable, so same-day field order is preserved) and lets the series
//! constructor reject duplicates and undeclared fields.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tickergrid_core::{
    AdapterError, DatasetAdapter, DatasetTag, FieldSpec, NormalizedSeries, Observation,
};

/// On-disk snapshot shape.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    #[allow(dead_code)]
    pub ticker: String,
    pub dataset: DatasetTag,
    pub fields: Vec<FieldSpec>,
    pub observations: Vec<Observation>,
}

impl Snapshot {
    /// Normalize into the engine's input shape.
    pub fn into_series(self) -> Result<NormalizedSeries, AdapterError> {
        let tag = self.dataset;
        let mut observations = self.observations;
        observations.sort_by_key(|o| o.date);
        NormalizedSeries::new(tag, self.fields, observations)
            .map_err(|source| AdapterError::Malformed { tag, source })
    }
}

/// Adapter reading one dataset's snapshot file from a local directory.
pub struct SnapshotAdapter {
    data_dir: PathBuf,
    tag: DatasetTag,
}

impl SnapshotAdapter {
    pub fn new(data_dir: &Path, tag: DatasetTag) -> Self {
        SnapshotAdapter {
            data_dir: data_dir.to_path_buf(),
            tag,
        }
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}_{}.json", ticker.to_uppercase(), self.tag))
    }
}

impl DatasetAdapter for SnapshotAdapter {
    fn tag(&self) -> DatasetTag {
        self.tag
    }

    fn series(
        &self,
        ticker: &str,
        _start: chrono::NaiveDate,
        _end: chrono::NaiveDate,
    ) -> Result<NormalizedSeries, AdapterError> {
        // Snapshots hold the full history, which covers any requested range
        // plus the pre-start history forward-fill needs.
        let path = self.path_for(ticker);
        let raw = std::fs::read_to_string(&path).map_err(|e| AdapterError::Unavailable {
            tag: self.tag,
            reason: format!("{}: {e}", path.display()),
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|e| AdapterError::Unavailable {
                tag: self.tag,
                reason: format!("{}: invalid snapshot: {e}", path.display()),
            })?;
        snapshot.into_series()
    }
}
