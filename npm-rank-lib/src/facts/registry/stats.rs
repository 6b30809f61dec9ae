use super::client::{ApiResult, Client, build_url};
use crate::ranking::{PackageName, RangeResponse, RankError, StatsFetcher, join_batch};

const LOG_TARGET: &str = "    stats";

/// Path placed between a stats host and the comma-joined package names.
pub const PATH_TEMPLATE: &str = "/downloads/range/last-month/";

/// Fetches daily downloads from the `/downloads/range/{period}/{names}` endpoint.
///
/// Hosts are mirrors of one another and are tried in order until one answers.
#[derive(Debug, Clone)]
pub struct HttpStatsFetcher {
    client: Client,
    hosts: Vec<String>,
}

impl HttpStatsFetcher {
    #[must_use]
    pub const fn new(client: Client, hosts: Vec<String>) -> Self {
        Self { client, hosts }
    }
}

impl StatsFetcher for HttpStatsFetcher {
    async fn fetch_range(&self, period: &str, batch: &[PackageName]) -> Result<RangeResponse, RankError> {
        let names = join_batch(batch);
        let mut last_error = RankError::Transport("no stats hosts configured".into());

        for host in &self.hosts {
            let url = build_url(host, ["downloads", "range", period, names.as_str()])?;

            match self.client.get_json::<RangeResponse>(&url).await {
                ApiResult::Success(response) => return Ok(response),

                // The API answers 404 when none of the requested packages exist
                ApiResult::NotFound => {
                    log::debug!(target: LOG_TARGET, "No downloads known for batch of {} package(s) at {host}", batch.len());
                    return Ok(RangeResponse::bulk(batch.iter().map(|name| (name.clone(), None))));
                }

                ApiResult::Failed(e) => {
                    log::debug!(target: LOG_TARGET, "Stats host {host} failed: {e}");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
