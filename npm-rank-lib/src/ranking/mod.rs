//! Download ranking for npm packages
//!
//! This module turns the raw daily download counts served by the npm downloads API
//! into a ranked list of packages.
//!
//! # Pipeline
//!
//! 1. A [`PackageLister`] resolves the packages of a user (or an explicit list is given).
//! 2. A [`ChunkPlanner`] packs the names into comma-joined batches that keep every
//!    request URL under the configured length limit.
//! 3. A [`StatsFetcher`] retrieves the last month of daily downloads for each batch,
//!    with a bounded number of requests in flight.
//! 4. Each package's counts are normalized into a complete [`DownloadSeries`] and
//!    aggregated into day, week, and month [`WindowStat`]s.
//! 5. The packages are stably sorted by the chosen [`Window`] into a [`RankedResult`].
//!
//! Everything except the two collaborators is a pure function of its inputs, including
//! the reference date, which callers compute once per invocation.

mod chunk_planner;
mod collaborators;
mod daily_count;
mod download_series;
mod package;
mod range_response;
mod rank_error;
mod ranked_result;
mod ranker;
mod window;
mod window_stat;

pub use chunk_planner::{ChunkPlanner, NAME_SEPARATOR, encoded_len, join_batch, max_batch_len, plan};
pub use collaborators::{LAST_MONTH, PackageLister, StatsFetcher};
pub use daily_count::DailyCount;
pub use download_series::{DownloadSeries, window_start};
pub use package::Package;
pub use range_response::{BulkEntry, RangeResponse, SingleRange};
pub use rank_error::RankError;
pub use ranked_result::RankedResult;
pub use ranker::Ranker;
pub use window::Window;
pub use window_stat::{MIN_DAY_ENTRIES, MIN_WEEK_ENTRIES, WindowCounts, WindowStat, aggregate, day_stat, month_stat, week_stat};

/// The name of an npm package.
pub type PackageName = compact_str::CompactString;
