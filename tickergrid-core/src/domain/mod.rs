//! Domain types: dataset tags, values, observations, normalized series.

pub mod dataset;
pub mod series;
pub mod value;

pub use dataset::DatasetTag;
pub use series::{NormalizedSeries, Observation, SeriesError};
pub use value::{FieldSpec, Value, ValueType};
