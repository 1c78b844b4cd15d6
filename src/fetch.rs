use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::constants::GEO_JSON;
use crate::error::FetchError;

/// Outbound GET client for the NWS API.
///
/// Idle connections are not pooled, so every call opens its own connection
/// and drops it when the call finishes or times out.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client })
    }

    /// Makes an HTTP GET request and parses the body as untyped JSON
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!(url, "GET");

        let outcome = self.send(url).await;
        if let Err(e) = &outcome {
            tracing::warn!(url, kind = %e.kind(), error = %e, "upstream request failed");
        }
        outcome
    }

    async fn send(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }
}
