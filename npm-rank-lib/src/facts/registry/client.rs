//! Minimal HTTP client for the npm registry and downloads APIs.

use crate::ranking::RankError;
use core::time::Duration;
use serde::de::DeserializeOwned;
use url::Url;

const LOG_TARGET: &str = "   client";

/// Result of a registry API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded and the body was decoded
    Success(T),

    /// The requested resource was not found (404)
    NotFound,

    /// Request failed, either in transport, with a non-success status, or while decoding
    Failed(RankError),
}

/// HTTP client shared by the registry collaborators.
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
}

impl Client {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("npm-rank/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body, classifying the outcome.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> ApiResult<T> {
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(transport_error(url, &e)),
        };

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            log::debug!(target: LOG_TARGET, "GET {url} returned 404");
            return ApiResult::NotFound;
        }

        if !status.is_success() {
            return ApiResult::Failed(RankError::Transport(format!("request to {url} failed with status {status}")));
        }

        match resp.json::<T>().await {
            Ok(body) => ApiResult::Success(body),
            Err(e) => ApiResult::Failed(RankError::Transport(format!("unable to decode response from {url}: {e}"))),
        }
    }
}

fn transport_error(url: &Url, e: &reqwest::Error) -> RankError {
    if e.is_timeout() {
        RankError::Transport(format!("request to {url} timed out"))
    } else {
        RankError::Transport(format!("request to {url} failed: {e}"))
    }
}

/// Parse `base` and append `segments` as path segments, each percent-encoded as needed.
///
/// A trailing slash on `base` is ignored.
pub fn build_url<'a>(base: &str, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, RankError> {
    let mut url = Url::parse(base).map_err(|e| RankError::InvalidInput(format!("invalid URL '{base}': {e}")))?;

    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| RankError::InvalidInput(format!("URL '{base}' cannot be used as a base")))?;
        let _ = path.pop_if_empty();
        let _ = path.extend(segments);
    }

    Ok(url)
}
