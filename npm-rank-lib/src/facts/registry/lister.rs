use super::client::{ApiResult, Client, build_url};
use crate::ranking::{PackageLister, PackageName, RankError};
use serde_json::{Map, Value};

const LOG_TARGET: &str = "   lister";

/// Lists the packages of a user through the registry's `/-/user/{user}/package` endpoint.
///
/// The endpoint answers with an object keyed by package name, whose values are the
/// user's access level to each package.
#[derive(Debug, Clone)]
pub struct HttpPackageLister {
    client: Client,
    registry_url: String,
}

impl HttpPackageLister {
    #[must_use]
    pub fn new(client: Client, registry_url: impl Into<String>) -> Self {
        Self {
            client,
            registry_url: registry_url.into(),
        }
    }
}

impl PackageLister for HttpPackageLister {
    async fn list(&self, user: &str) -> Result<Vec<PackageName>, RankError> {
        let url = build_url(&self.registry_url, ["-", "user", user, "package"])?;

        match self.client.get_json::<Map<String, Value>>(&url).await {
            ApiResult::Success(packages) => {
                let mut names: Vec<PackageName> = packages.into_iter().map(|(name, _)| name.into()).collect();
                names.sort_unstable();

                log::debug!(target: LOG_TARGET, "Found {} package(s) for user '{user}'", names.len());
                Ok(names)
            }
            ApiResult::NotFound => Err(RankError::NotFound(format!("npm user '{user}'"))),
            ApiResult::Failed(e) => Err(e),
        }
    }
}
