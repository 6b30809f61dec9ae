//! HTTP implementations of the ranking collaborators.

mod client;
mod lister;
mod stats;

pub use client::{ApiResult, Client, build_url};
pub use lister::HttpPackageLister;
pub use stats::{HttpStatsFetcher, PATH_TEMPLATE};
