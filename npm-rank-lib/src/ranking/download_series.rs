//! Gap-filled, chronologically ordered download history.

use super::DailyCount;
use chrono::{Months, NaiveDate};
use core::ops::Deref;
use std::collections::HashSet;

/// Daily downloads of one package, ascending by day with one entry per day.
///
/// Every day from one calendar month before the reference date up to the day
/// before the reference date is present. The reference date itself is never
/// synthesized since its counts are not final at the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSeries {
    entries: Vec<DailyCount>,
}

impl DownloadSeries {
    /// Backfill and order raw daily counts against `reference_date`.
    ///
    /// Days of the canonical window missing from `raw` are added with zero
    /// downloads. Entries already present are kept untouched, including any
    /// that fall outside the window. When the source repeats a day, the first
    /// occurrence wins.
    #[must_use]
    pub fn normalize(raw: impl IntoIterator<Item = DailyCount>, reference_date: NaiveDate) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<DailyCount> = raw.into_iter().filter(|entry| seen.insert(entry.day)).collect();

        for day in canonical_days(reference_date) {
            if seen.insert(day) {
                entries.push(DailyCount::new(day, 0));
            }
        }

        entries.sort_by_key(|entry| entry.day);
        Self { entries }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DailyCount] {
        &self.entries
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<DailyCount> {
        self.entries
    }

    /// Total downloads across the whole series.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.downloads).sum()
    }
}

impl Deref for DownloadSeries {
    type Target = [DailyCount];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

/// First day of the canonical window: the same day one month earlier, clamped
/// to the end of shorter months.
#[must_use]
pub fn window_start(reference_date: NaiveDate) -> NaiveDate {
    reference_date.checked_sub_months(Months::new(1)).unwrap_or(NaiveDate::MIN)
}

/// Every day in `[reference_date - 1 month, reference_date - 1 day]`.
fn canonical_days(reference_date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    window_start(reference_date).iter_days().take_while(move |day| *day < reference_date)
}
