//! Column catalog: the self-describing output schema.
//!
//! Derived per request from the adapters' field declarations — not from
//! emitted values — so always-null columns still appear with their declared
//! type. Ordering is stable (sparsity rank, then declaration order) so
//! repeated requests yield byte-identical column lists.

use crate::domain::{DatasetTag, NormalizedSeries, ValueType};
use serde::{Deserialize, Serialize};

/// Namespaced column key: field identity is `(dataset_tag, field_name)`.
pub fn column_key(tag: DatasetTag, field: &str) -> String {
    format!("{tag}.{field}")
}

/// Describes one output column for the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Namespaced key matching the row cells (`"{tag}.{field}"`).
    pub key: String,
    /// Human-readable label derived from the field name.
    pub label: String,
    /// Source dataset.
    pub dataset: DatasetTag,
    /// The adapter's declared type, reported verbatim.
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

/// Derive the column list for a set of merged datasets.
///
/// One descriptor per declared field of every dataset, including fields with
/// no in-range observations (their cells are null but the column is still
/// valid to render). Datasets ordered sparsest first, fields in declaration
/// order within a dataset.
pub fn derive_columns(series: &[NormalizedSeries]) -> Vec<ColumnDescriptor> {
    let mut ordered: Vec<&NormalizedSeries> = series.iter().collect();
    ordered.sort_by_key(|s| s.tag().rank());

    let mut columns = Vec::new();
    for s in ordered {
        for spec in s.fields() {
            columns.push(ColumnDescriptor {
                key: column_key(s.tag(), &spec.name),
                label: label_for(&spec.name),
                dataset: s.tag(),
                value_type: spec.value_type,
            });
        }
    }
    columns
}

/// "price_close" → "Price Close".
fn label_for(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
