//! Observations and the normalized per-dataset series.
//!
//! A `NormalizedSeries` is the only input shape the engine accepts from a
//! Dataset Adapter. Its constructor enforces the adapter contract (dates
//! non-decreasing, unique (date, field), every field declared) so the merge
//! can be a single forward-only pass with no re-sorting or re-checking.

use super::dataset::DatasetTag;
use super::value::{FieldSpec, Value};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// One observed data point: a field took a value on a calendar date.
///
/// Dates carry no time-of-day; adapters normalize intraday sources
/// (e.g. hourly news) down to one record per day before handing off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub field: String,
    pub value: Value,
}

impl Observation {
    pub fn new(date: NaiveDate, field: &str, value: impl Into<Value>) -> Self {
        Observation {
            date,
            field: field.to_string(),
            value: value.into(),
        }
    }
}

/// Contract violations in a Dataset Adapter's output.
///
/// These indicate adapter bugs, caught at the boundary when a series is
/// constructed — never inside the merge.
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("observations not sorted by date: {prev} followed by {next}")]
    UnsortedDates { prev: NaiveDate, next: NaiveDate },

    #[error("duplicate observation for field '{field}' on {date}")]
    DuplicateObservation { field: String, date: NaiveDate },

    #[error("observation references undeclared field '{0}'")]
    UndeclaredField(String),

    #[error("duplicate field declaration '{0}'")]
    DuplicateField(String),
}

/// A date-ordered, de-duplicated sequence of observations for one dataset,
/// plus the adapter's field declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    tag: DatasetTag,
    fields: Vec<FieldSpec>,
    observations: Vec<Observation>,
}

impl NormalizedSeries {
    /// Build a series, validating the adapter contract.
    pub fn new(
        tag: DatasetTag,
        fields: Vec<FieldSpec>,
        observations: Vec<Observation>,
    ) -> Result<Self, SeriesError> {
        let mut declared: HashSet<&str> = HashSet::with_capacity(fields.len());
        for spec in &fields {
            if !declared.insert(spec.name.as_str()) {
                return Err(SeriesError::DuplicateField(spec.name.clone()));
            }
        }

        let mut seen: HashSet<(NaiveDate, &str)> = HashSet::with_capacity(observations.len());
        for pair in observations.windows(2) {
            if pair[1].date < pair[0].date {
                return Err(SeriesError::UnsortedDates {
                    prev: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        for obs in &observations {
            if !declared.contains(obs.field.as_str()) {
                return Err(SeriesError::UndeclaredField(obs.field.clone()));
            }
            if !seen.insert((obs.date, obs.field.as_str())) {
                return Err(SeriesError::DuplicateObservation {
                    field: obs.field.clone(),
                    date: obs.date,
                });
            }
        }

        Ok(NormalizedSeries {
            tag,
            fields,
            observations,
        })
    }

    /// An empty series for a dataset that produced nothing.
    ///
    /// No field declarations means no columns in the output — the shape a
    /// failed adapter degrades to.
    pub fn empty(tag: DatasetTag) -> Self {
        NormalizedSeries {
            tag,
            fields: Vec::new(),
            observations: Vec::new(),
        }
    }

    pub fn tag(&self) -> DatasetTag {
        self.tag
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// True if at least one observation falls within `[start, end]`.
    pub fn has_observation_in(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.observations
            .iter()
            .any(|o| o.date >= start && o.date <= end)
    }

    /// Distinct observation dates within `[start, end]`, ascending.
    pub fn dates_in(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = Vec::new();
        for obs in &self.observations {
            if obs.date < start || obs.date > end {
                continue;
            }
            if dates.last() != Some(&obs.date) {
                dates.push(obs.date);
            }
        }
        dates
    }
}
