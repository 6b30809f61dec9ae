/// Receives progress updates from the ranking pipeline.
///
/// Implementations must be cheap to call, as the pipeline reports from inside its fetch loop.
pub trait Progress: Send + Sync {
    /// Label the current phase ("Listing", "Fetching", "Ranking").
    fn set_phase(&self, phase: &str);

    /// Report bounded progress through a callback returning `(total, done, message)`.
    ///
    /// The callback is polled by the reporter, so it must only read shared state.
    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>);

    /// Report unbounded progress through a callback returning a message.
    fn set_indeterminate(&self, callback: Box<dyn Fn() -> String + Send + Sync + 'static>);

    /// Clear the indicator.
    fn done(&self);
}
