//! Data collection from the npm registry
//!
//! This module provides the HTTP side of ranking: the [`HttpPackageLister`] resolves the
//! packages a user maintains through the registry, and the [`HttpStatsFetcher`] retrieves
//! daily download counts from the downloads API, trying each configured mirror in turn.
//!
//! Both share a [`Client`] configured with the request timeout. Requests are not retried;
//! a failed batch surfaces as a transport error and aborts the ranking.
//!
//! Long-running work reports through the [`Progress`] trait.

mod progress;
pub mod registry;

pub use progress::Progress;
pub use registry::{Client, HttpPackageLister, HttpStatsFetcher};
