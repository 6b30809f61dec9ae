use super::{
    ChunkPlanner, LAST_MONTH, Package, PackageLister, PackageName, RangeResponse, RankError, RankedResult, StatsFetcher, Window,
};
use crate::facts::Progress;
use chrono::NaiveDate;
use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicU64, Ordering};
use futures_util::StreamExt;
use futures_util::stream;
use std::sync::Arc;

const LOG_TARGET: &str = "   ranker";

/// Ranks packages by downloads.
///
/// Package names are resolved through a [`PackageLister`], split into batches by a
/// [`ChunkPlanner`], and fetched through a [`StatsFetcher`] with at most
/// `max_concurrent_requests` batches in flight.
#[derive(Debug)]
pub struct Ranker<L, F> {
    lister: L,
    fetcher: F,
    planner: ChunkPlanner,
    max_concurrent_requests: NonZeroUsize,
}

impl<L: PackageLister, F: StatsFetcher> Ranker<L, F> {
    #[must_use]
    pub const fn new(lister: L, fetcher: F, planner: ChunkPlanner, max_concurrent_requests: NonZeroUsize) -> Self {
        Self {
            lister,
            fetcher,
            planner,
            max_concurrent_requests,
        }
    }

    /// Rank every package maintained by `user`.
    ///
    /// # Errors
    ///
    /// Fails with [`RankError::InvalidInput`] for a blank user, [`RankError::NotFound`] when the
    /// user maintains no packages, and otherwise with the first error hit while listing or fetching.
    pub async fn rank(&self, user: &str, window: Window, reference_date: NaiveDate, progress: &dyn Progress) -> Result<RankedResult, RankError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(RankError::InvalidInput("npm username not given".into()));
        }

        progress.set_phase("Listing");
        let message = format!("packages of {user}");
        progress.set_indeterminate(Box::new(move || message.clone()));

        let names = self.lister.list(user).await?;
        log::debug!(target: LOG_TARGET, "User '{user}' maintains {} package(s)", names.len());

        if names.is_empty() {
            return Err(RankError::NotFound(format!("no packages found for user '{user}'")));
        }

        self.rank_names(&names, window, reference_date, progress).await
    }

    /// Rank an explicit list of packages.
    ///
    /// # Errors
    ///
    /// Fails with [`RankError::NotFound`] when `names` is empty, and otherwise with the first error hit while fetching.
    pub async fn rank_packages(
        &self,
        names: &[PackageName],
        window: Window,
        reference_date: NaiveDate,
        progress: &dyn Progress,
    ) -> Result<RankedResult, RankError> {
        if names.is_empty() {
            return Err(RankError::NotFound("no packages to rank".into()));
        }

        self.rank_names(names, window, reference_date, progress).await
    }

    async fn rank_names(
        &self,
        names: &[PackageName],
        window: Window,
        reference_date: NaiveDate,
        progress: &dyn Progress,
    ) -> Result<RankedResult, RankError> {
        let batches = self.planner.plan(names)?;
        log::debug!(
            target: LOG_TARGET,
            "Fetching {} package(s) in {} batch(es) of at most {} characters",
            names.len(),
            batches.len(),
            self.planner.max_batch_len()
        );

        let responses = self.fetch_all(batches, progress).await?;

        progress.set_phase("Ranking");
        let mut packages = Vec::with_capacity(names.len());
        for (batch, response) in responses {
            for (name, raw) in response.into_series(&batch) {
                packages.push(Package::from_raw(name, raw, reference_date)?);
            }
        }

        let ranked = RankedResult::new(window, packages);
        log::debug!(target: LOG_TARGET, "Ranked {} package(s) by {window} downloads", ranked.len());

        Ok(ranked)
    }

    /// Fetch every batch and return the responses in batch order.
    ///
    /// All requests run to completion before the first failure, in batch order, is reported.
    async fn fetch_all(&self, batches: Vec<Vec<PackageName>>, progress: &dyn Progress) -> Result<Vec<(Vec<PackageName>, RangeResponse)>, RankError> {
        let total = batches.len() as u64;
        let completed = Arc::new(AtomicU64::new(0));

        progress.set_phase("Fetching");
        let completed_clone = Arc::clone(&completed);
        progress.set_determinate(Box::new(move || {
            let done = completed_clone.load(Ordering::Relaxed);
            (total, done, format!("{done}/{total} batches"))
        }));

        let results: Vec<_> = stream::iter(batches)
            .map(|batch| {
                let completed = &completed;
                async move {
                    let result = self.fetcher.fetch_range(LAST_MONTH, &batch).await;
                    let _ = completed.fetch_add(1, Ordering::Relaxed);

                    if let Err(e) = &result {
                        log::debug!(target: LOG_TARGET, "Batch of {} package(s) failed: {e}", batch.len());
                    }

                    result.map(|response| (batch, response))
                }
            })
            .buffered(self.max_concurrent_requests.get())
            .collect()
            .await;

        results.into_iter().collect()
    }
}
