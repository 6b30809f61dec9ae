//! Download statistics for day, week, and month windows.

use super::{DailyCount, DownloadSeries, RankError, Window};
use serde::Serialize;

const DAYS_PER_WEEK: usize = 7;

/// Minimum series length for the day statistic.
pub const MIN_DAY_ENTRIES: usize = 2;

/// Minimum series length for the week statistic.
pub const MIN_WEEK_ENTRIES: usize = DAYS_PER_WEEK * 2;

/// Downloads over a window compared against the window before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowStat {
    /// Downloads summed over the window.
    pub count: u64,

    /// `count` minus the downloads of the preceding window of equal length.
    pub delta: i64,

    /// `delta` as a percentage of the preceding window, rounded to two decimals.
    ///
    /// Zero when the preceding window had no downloads.
    pub percent: f64,

    pub increased: bool,
    pub decreased: bool,
}

impl WindowStat {
    /// Compare a window's downloads against its baseline.
    #[must_use]
    pub fn compare(count: u64, baseline: u64) -> Self {
        let delta = signed_difference(count, baseline);

        Self {
            count,
            delta,
            percent: percent_change(delta, baseline),
            increased: delta > 0,
            decreased: delta < 0,
        }
    }

    /// A window with no baseline to compare against.
    #[must_use]
    pub const fn without_baseline(count: u64) -> Self {
        Self {
            count,
            delta: 0,
            percent: 0.0,
            increased: false,
            decreased: false,
        }
    }
}

/// Statistics for each supported window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowCounts {
    pub day: WindowStat,
    pub week: WindowStat,
    pub month: WindowStat,
}

impl WindowCounts {
    #[must_use]
    pub const fn get(&self, window: Window) -> &WindowStat {
        match window {
            Window::Day => &self.day,
            Window::Week => &self.week,
            Window::Month => &self.month,
        }
    }
}

/// Compute all window statistics of a normalized series.
///
/// # Errors
///
/// Returns [`RankError::InsufficientData`] if the series has fewer than two weeks of entries.
pub fn aggregate(series: &DownloadSeries) -> Result<WindowCounts, RankError> {
    ensure_len(series, MIN_WEEK_ENTRIES)?;

    Ok(WindowCounts {
        day: day_stat(series)?,
        week: week_stat(series)?,
        month: month_stat(series),
    })
}

/// Last day against the day before it.
///
/// The last entry is used as is. A series normalized from a source that already reported
/// the reference date keeps that entry, so its partial count becomes the last day.
///
/// # Errors
///
/// Returns [`RankError::InsufficientData`] if there are fewer than two entries.
pub fn day_stat(entries: &[DailyCount]) -> Result<WindowStat, RankError> {
    ensure_len(entries, MIN_DAY_ENTRIES)?;

    let last = entries[entries.len() - 1].downloads;
    let before = entries[entries.len() - 2].downloads;
    Ok(WindowStat::compare(last, before))
}

/// Last seven days against the seven days before them.
///
/// # Errors
///
/// Returns [`RankError::InsufficientData`] if there are fewer than fourteen entries.
pub fn week_stat(entries: &[DailyCount]) -> Result<WindowStat, RankError> {
    ensure_len(entries, MIN_WEEK_ENTRIES)?;

    let (rest, this_week) = entries.split_at(entries.len() - DAYS_PER_WEEK);
    let last_week = &rest[rest.len() - DAYS_PER_WEEK..];
    Ok(WindowStat::compare(sum(this_week), sum(last_week)))
}

/// Every entry of the series.
///
/// The prior month is not fetched so there is no baseline.
#[must_use]
pub fn month_stat(entries: &[DailyCount]) -> WindowStat {
    WindowStat::without_baseline(sum(entries))
}

fn ensure_len(entries: &[DailyCount], required: usize) -> Result<(), RankError> {
    if entries.len() < required {
        return Err(RankError::InsufficientData {
            required,
            actual: entries.len(),
        });
    }

    Ok(())
}

fn sum(entries: &[DailyCount]) -> u64 {
    entries.iter().map(|entry| entry.downloads).sum()
}

fn signed_difference(current: u64, previous: u64) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |magnitude| -magnitude)
    }
}

#[expect(clippy::cast_precision_loss, reason = "download counts are far below 2^52")]
fn percent_change(delta: i64, baseline: u64) -> f64 {
    if baseline == 0 {
        return 0.0;
    }

    round_to_hundredths(delta as f64 / baseline as f64 * 100.0)
}

/// Round half away from zero to two decimal places.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
