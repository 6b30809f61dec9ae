//! Interfaces to the data sources the ranking pipeline consumes.

use super::{PackageName, RangeResponse, RankError};

/// The only query period requested from the downloads API.
///
/// Day and week statistics are derived locally from the month of daily counts.
pub const LAST_MONTH: &str = "last-month";

/// Resolves the packages maintained by a registry user.
pub trait PackageLister: Send + Sync {
    /// List the package names maintained by `user`.
    ///
    /// An unknown user is reported as [`RankError::NotFound`], a failed call as [`RankError::Transport`].
    fn list(&self, user: &str) -> impl Future<Output = Result<Vec<PackageName>, RankError>> + Send;
}

/// Fetches raw daily download counts for a batch of packages.
pub trait StatsFetcher: Send + Sync {
    /// Fetch the daily downloads of every package in `batch` over `period`.
    fn fetch_range(&self, period: &str, batch: &[PackageName]) -> impl Future<Output = Result<RangeResponse, RankError>> + Send;
}
