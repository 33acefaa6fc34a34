//! Dataset tags and the static sparsity policy.

use crate::error::AlignError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five recognized datasets, ordered by how infrequently they update.
///
/// The sparsity rank is a domain judgment fixed at design time, not a
/// statistic computed from row counts: a dataset with many clustered
/// observations must not outrank one with few evenly spread observations.
/// Rank 0 = sparsest. The rank decides only which dataset's real dates
/// define the sparse-mode reference index; it never changes forward-fill
/// semantics of the other datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetTag {
    Executives,
    Filings,
    Financials,
    News,
    Prices,
}

impl DatasetTag {
    /// All recognized tags, sparsest first.
    pub const ALL: [DatasetTag; 5] = [
        DatasetTag::Executives,
        DatasetTag::Filings,
        DatasetTag::Financials,
        DatasetTag::News,
        DatasetTag::Prices,
    ];

    /// Sparsity rank: 0 = sparsest (executives), 4 = densest (prices).
    pub fn rank(self) -> u8 {
        match self {
            DatasetTag::Executives => 0,
            DatasetTag::Filings => 1,
            DatasetTag::Financials => 2,
            DatasetTag::News => 3,
            DatasetTag::Prices => 4,
        }
    }

    /// Lowercase wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetTag::Executives => "executives",
            DatasetTag::Filings => "filings",
            DatasetTag::Financials => "financials",
            DatasetTag::News => "news",
            DatasetTag::Prices => "prices",
        }
    }
}

impl fmt::Display for DatasetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetTag {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "executives" => Ok(DatasetTag::Executives),
            "filings" => Ok(DatasetTag::Filings),
            "financials" => Ok(DatasetTag::Financials),
            "news" => Ok(DatasetTag::News),
            "prices" => Ok(DatasetTag::Prices),
            other => Err(AlignError::UnknownDataset(other.to_string())),
        }
    }
}
