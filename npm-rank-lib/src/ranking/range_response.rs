//! Response shapes of the downloads range API.
//!
//! A query for a single package answers with that package's range, while a
//! query for several packages answers with an object keyed by package name
//! whose values are ranges, or `null` for unknown packages. Both are resolved
//! here into one canonical list before entering the ranking pipeline.

use super::{DailyCount, PackageName};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw downloads returned for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RangeResponse {
    /// `{ "package": "x", "downloads": [...] }`
    Single(SingleRange),

    /// `{ "x": { "downloads": [...] }, "y": null }`
    Bulk(BTreeMap<PackageName, Option<BulkEntry>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SingleRange {
    pub package: PackageName,
    pub downloads: Vec<DailyCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkEntry {
    pub downloads: Vec<DailyCount>,
}

impl RangeResponse {
    #[must_use]
    pub fn single(package: impl Into<PackageName>, downloads: Vec<DailyCount>) -> Self {
        Self::Single(SingleRange {
            package: package.into(),
            downloads,
        })
    }

    #[must_use]
    pub fn bulk<N: Into<PackageName>>(entries: impl IntoIterator<Item = (N, Option<Vec<DailyCount>>)>) -> Self {
        Self::Bulk(
            entries
                .into_iter()
                .map(|(name, downloads)| (name.into(), downloads.map(|downloads| BulkEntry { downloads })))
                .collect(),
        )
    }

    /// Resolve the response into `(name, raw downloads)` pairs.
    ///
    /// Packages follow the order of `batch`. Packages the response carries
    /// without having been requested come last, by name. A `null` entry yields
    /// an empty series and requested packages absent from the response are
    /// skipped.
    #[must_use]
    pub fn into_series(self, batch: &[PackageName]) -> Vec<(PackageName, Vec<DailyCount>)> {
        match self {
            Self::Single(range) => vec![(range.package, range.downloads)],
            Self::Bulk(mut entries) => {
                let mut series = Vec::with_capacity(entries.len());

                for name in batch {
                    if let Some(entry) = entries.remove(name) {
                        series.push((name.clone(), entry.map(|e| e.downloads).unwrap_or_default()));
                    }
                }

                series.extend(
                    entries
                        .into_iter()
                        .map(|(name, entry)| (name, entry.map(|e| e.downloads).unwrap_or_default())),
                );

                series
            }
        }
    }
}
