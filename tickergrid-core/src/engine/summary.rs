//! Latest-value summary over aligned rows.
//!
//! For an overview card: the most recent non-null value per column and the
//! date it was observed (or last carried to). Columns that never held a
//! value are omitted.

use super::catalog::ColumnDescriptor;
use super::merge::AlignedRow;
use crate::domain::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Latest known value for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub key: String,
    pub value: Value,
    pub as_of: NaiveDate,
}

/// Latest non-null value per column, in catalog order.
pub fn latest_values(columns: &[ColumnDescriptor], rows: &[AlignedRow]) -> Vec<SummaryEntry> {
    let mut entries = Vec::new();
    for column in columns {
        let latest = rows.iter().rev().find_map(|row| {
            row.cells
                .get(&column.key)
                .and_then(|cell| cell.as_ref())
                .map(|value| (row.date, value.clone()))
        });
        if let Some((as_of, value)) = latest {
            entries.push(SummaryEntry {
                key: column.key.clone(),
                value,
                as_of,
            });
        }
    }
    entries
}
