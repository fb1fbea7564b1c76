use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;
use serde_json::Value;

use crate::{config, engines::ImageSearchEngine, error::FetchError, models::RawImageResult};

/// Google Images through SerpApi.
#[derive(Clone)]
pub struct SerpApi {
    client: Client,
    endpoint: String,
    key: Option<String>,
    user_agent: String,
    timeout: Duration,
}

impl SerpApi {
    pub(crate) fn new(client: Client, settings: &config::SerpApi, user_agent: &str) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            key: settings.api_key().map(str::to_string),
            user_agent: user_agent.to_string(),
            timeout: Duration::from_secs(settings.timeout),
        }
    }

    /// A missing or non-array `images_results` is an empty result set.
    fn parse_results(body: &Value) -> Vec<RawImageResult> {
        let Some(entries) = body.get("images_results").and_then(Value::as_array) else {
            log::warn!("SerpApi response has no images_results array");
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| match RawImageResult::deserialize(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    log::debug!("Skipping unreadable SerpApi entry: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl ImageSearchEngine for SerpApi {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    fn enabled(&self) -> bool {
        self.key.is_some()
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<RawImageResult>> {
        let Some(key) = self.key.as_deref() else {
            return Ok(Vec::new());
        };

        log::info!("Searching SerpApi for {:?} (page {})", query, page);
        let page = page.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, self.user_agent.as_str())
            .query(&[
                ("engine", "google_images"),
                ("q", query),
                ("tbm", "isch"),
                ("tbs", "itp:photo,isz:l"),
                ("safe", "active"),
                ("ijn", page.as_str()),
                ("api_key", key),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(FetchError::from)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()).into());
        }

        let body: Value = response.json().await.map_err(FetchError::from)?;
        Ok(Self::parse_results(&body))
    }
}
