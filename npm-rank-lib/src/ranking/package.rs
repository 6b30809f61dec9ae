use super::{DailyCount, DownloadSeries, PackageName, RankError, WindowCounts, aggregate};
use chrono::NaiveDate;

/// A package with its normalized download history and window statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: PackageName,
    pub downloads: DownloadSeries,
    pub counts: WindowCounts,
}

impl Package {
    /// Normalize raw daily counts against `reference_date` and aggregate them.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InsufficientData`] if the normalized series is too short.
    pub fn from_raw(name: PackageName, raw: Vec<DailyCount>, reference_date: NaiveDate) -> Result<Self, RankError> {
        let downloads = DownloadSeries::normalize(raw, reference_date);
        let counts = aggregate(&downloads)?;

        Ok(Self { name, downloads, counts })
    }
}
