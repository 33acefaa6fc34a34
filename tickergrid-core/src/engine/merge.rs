//! Forward-fill merge of normalized series onto a reference index.
//!
//! Single linear pass: one integer cursor per dataset, one two-state fill
//! machine per field. O(total observations + index length). Requires
//! date-sorted input, which the `NormalizedSeries` constructor guarantees.
//! Values are only ever carried forward — never interpolated, averaged, or
//! extrapolated.

use super::catalog::column_key;
use super::index::ReferenceIndex;
use crate::domain::{NormalizedSeries, Value};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One output record: a date plus every tracked column's forward-filled
/// value, or null where no observation exists at or before that date.
///
/// Cells are keyed by the namespaced column key (`"{tag}.{field}"`), so the
/// same field name in two datasets never collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub cells: BTreeMap<String, Option<Value>>,
}

/// Per-field fill state: nothing seen yet, or carrying the latest value.
#[derive(Debug, Clone)]
enum FillState {
    Unseen,
    Carrying(Value),
}

impl FillState {
    fn observe(&mut self, value: Value) {
        *self = FillState::Carrying(value);
    }

    fn current(&self) -> Option<&Value> {
        match self {
            FillState::Unseen => None,
            FillState::Carrying(v) => Some(v),
        }
    }
}

/// Cursor and fill state for one dataset during the merge.
struct DatasetCursor<'a> {
    series: &'a NormalizedSeries,
    /// Offset of the next unconsumed observation.
    next: usize,
    /// Fill state per declared field, in declaration order.
    /// Parallel to `series.fields()`.
    states: Vec<FillState>,
    /// Namespaced column key per declared field, precomputed.
    keys: Vec<String>,
}

impl<'a> DatasetCursor<'a> {
    fn new(series: &'a NormalizedSeries) -> Self {
        let states = vec![FillState::Unseen; series.fields().len()];
        let keys = series
            .fields()
            .iter()
            .map(|f| column_key(series.tag(), &f.name))
            .collect();
        DatasetCursor {
            series,
            next: 0,
            states,
            keys,
        }
    }

    /// Consume every observation dated at or before `date`, keeping the
    /// latest value seen per field. The cursor only moves forward.
    fn advance_to(&mut self, date: NaiveDate) {
        let observations = self.series.observations();
        while let Some(obs) = observations.get(self.next) {
            if obs.date > date {
                break;
            }
            // Declared-field lookup cannot fail: the series constructor
            // rejects undeclared fields.
            if let Some(idx) = self
                .series
                .fields()
                .iter()
                .position(|f| f.name == obs.field)
            {
                self.states[idx].observe(obs.value.clone());
            }
            self.next += 1;
        }
    }

    /// Emit the currently-held value (or null) for every declared field.
    fn emit_into(&self, cells: &mut BTreeMap<String, Option<Value>>) {
        for (key, state) in self.keys.iter().zip(&self.states) {
            cells.insert(key.clone(), state.current().cloned());
        }
    }
}

/// Merge every series onto the reference index with forward-fill.
///
/// Every row carries a cell for every declared field of every dataset; a
/// dataset with no observations contributes all-null cells, not an error.
/// Observations before the first reference date are consumed there, so
/// history handed in before `start` resolves the fill at the first row.
pub fn merge(index: &ReferenceIndex, series: &[NormalizedSeries]) -> Vec<AlignedRow> {
    let mut cursors: Vec<DatasetCursor> = series.iter().map(DatasetCursor::new).collect();
    let mut rows = Vec::with_capacity(index.dates.len());

    for &date in &index.dates {
        let mut cells = BTreeMap::new();
        for cursor in &mut cursors {
            cursor.advance_to(date);
            cursor.emit_into(&mut cells);
        }
        rows.push(AlignedRow { date, cells });
    }

    rows
}
