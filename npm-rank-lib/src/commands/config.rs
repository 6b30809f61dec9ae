use crate::Result;
use crate::facts::registry::{PATH_TEMPLATE, build_url};
use crate::ranking::ChunkPlanner;
use camino::{Utf8Path, Utf8PathBuf};
use core::num::NonZeroUsize;
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given
pub const CONFIG_FILE_NAME: &str = "npm-rank.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the registry used to list a user's packages
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Base URLs of the downloads API mirrors, tried in order
    #[serde(default = "default_stats_hosts")]
    pub stats_hosts: Vec<String>,

    /// Maximum length of a downloads request URL
    #[serde(default = "default_max_request_length")]
    pub max_request_length: usize,

    /// Maximum number of batches fetched concurrently
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Time to wait for a single request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_registry_url() -> String {
    "https://registry.npmjs.org".into()
}

fn default_stats_hosts() -> Vec<String> {
    vec!["https://api.npmjs.org".into()]
}

const fn default_max_request_length() -> usize {
    2048
}

const fn default_max_concurrent_requests() -> usize {
    8
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `npm-rank.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading npm-rank configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading npm-rank configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config
            .validate()
            .map_err(|e| e.enrich_with(|| format!("validating configuration file '{final_path}'")))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Batch planner sized for the configured hosts and request length
    ///
    /// # Errors
    ///
    /// Returns an error if no package name could fit in a request
    pub fn planner(&self) -> Result<ChunkPlanner> {
        ChunkPlanner::for_hosts(self.max_request_length, &self.stats_hosts, PATH_TEMPLATE).into_app_err("sizing request batches")
    }

    /// Concurrency ceiling as a non-zero count
    ///
    /// # Errors
    ///
    /// Returns an error if `max_concurrent_requests` is zero
    pub fn concurrency(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.max_concurrent_requests).into_app_err("max_concurrent_requests must be at least 1")
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a URL does not parse or a limit is out of range
    fn validate(&self) -> Result<()> {
        let _ = build_url(&self.registry_url, []).into_app_err("registry_url is not a usable URL")?;

        if self.stats_hosts.is_empty() {
            return Err(app_err!("stats_hosts must list at least one host"));
        }

        for host in &self.stats_hosts {
            let _ = build_url(host, []).into_app_err_with(|| format!("stats host '{host}' is not a usable URL"))?;
        }

        let _ = self.planner()?;
        let _ = self.concurrency()?;

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
