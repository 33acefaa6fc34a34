//! Cell values and per-field type declarations.

use serde::{Deserialize, Serialize};

/// A single observed value.
///
/// Untagged so payload cells serialize as plain JSON scalars
/// (`185.2`, `"10-K"`) rather than enum wrappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Declared type of a field, supplied by the Dataset Adapter.
///
/// The column catalog reports this declaration verbatim; it never guesses
/// a type from observed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    Text,
    Categorical,
}

/// One field declaration from a Dataset Adapter: name plus declared type.
///
/// Declaration order is significant — the column catalog orders fields
/// within a dataset by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl FieldSpec {
    pub fn number(name: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            value_type: ValueType::Number,
        }
    }

    pub fn text(name: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            value_type: ValueType::Text,
        }
    }

    pub fn categorical(name: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            value_type: ValueType::Categorical,
        }
    }
}
