use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Downloads recorded for a package on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyCount {
    /// The calendar day, serialized as `YYYY-MM-DD`.
    pub day: NaiveDate,

    /// Number of downloads on that day.
    pub downloads: u64,
}

impl DailyCount {
    #[must_use]
    pub const fn new(day: NaiveDate, downloads: u64) -> Self {
        Self { day, downloads }
    }
}
