use std::time::Duration;

use async_trait::async_trait;
use marquee_common::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{Fetcher, Query};
use crate::config::ProviderConfig;

/// Header accepted by both Jellyfin and Emby for API-key authentication.
const TOKEN_HEADER: &str = "X-Emby-Token";

/// Accepted range for the per-request timeout, in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 60;

/// Fetcher talking to a Jellyfin/Emby server over HTTP.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpFetcher {
    /// Build a fetcher from provider settings.
    ///
    /// Fails with [`Error::Configuration`] when the url or api key is missing,
    /// the url does not parse, or the timeout is outside 1..=60 seconds.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::configuration("provider url is empty"));
        }
        if config.api_key.trim().is_empty() {
            return Err(Error::configuration("provider api_key is empty"));
        }
        reqwest::Url::parse(&config.url)
            .map_err(|e| Error::configuration(format!("invalid provider url {:?}: {}", config.url, e)))?;

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&config.timeout_secs) {
            return Err(Error::configuration(format!(
                "provider timeout_secs must be between {} and {}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, config.timeout_secs
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, path: &str, query: &Query) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status.as_u16(), path));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::decode(format!("GET {} returned invalid JSON: {}", path, e)))
    }
}
