//! Dashboard client: HTTP access to the Meraki Dashboard v1 REST API
//!
//! Handles authentication headers, status mapping and `Link`-header
//! pagination. No retries: a failed request surfaces as [`ApiError`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::wire::{next_page_link, ApUtilizationRecord, RfProfileRecord};
use super::{ApiError, DashboardApi};
use crate::config::{defaults, ApiConfig};
use crate::types::{AccessPointUtilizationSample, Network, Organization};

/// HTTP client for dashboard communication
#[derive(Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    per_page: u32,
}

impl DashboardClient {
    /// Create a new dashboard client
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
        per_page: u32,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(defaults::USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            per_page,
        })
    }

    /// Build from config, reading the key from `MERAKI_DASHBOARD_API_KEY`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let api_key = std::env::var(defaults::API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ApiError::MissingApiKey)?;
        Self::new(
            &config.base_url,
            &api_key,
            Duration::from_secs(config.timeout_secs),
            config.per_page,
        )
    }

    /// Get base URL for logging
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let resp = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(ApiError::Status {
                status,
                url: url.to_string(),
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.send(&url).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Follow `rel=next` links until the collection is exhausted.
    async fn get_paginated<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut url = format!("{}{}{}perPage={}", self.base_url, path, separator, self.per_page);
        let mut items = Vec::new();

        for page in 1..=defaults::MAX_PAGES {
            let resp = self.send(&url).await?;
            let next = resp
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_link);
            let mut batch = resp.json::<Vec<T>>().await?;
            debug!(page, items = batch.len(), path, "Fetched page");

            let last_page = batch.is_empty();
            items.append(&mut batch);

            match next {
                Some(next_url) if !last_page => url = next_url,
                _ => return Ok(items),
            }
        }

        Err(ApiError::TooManyPages(defaults::MAX_PAGES))
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn organizations(&self) -> Result<Vec<Organization>, ApiError> {
        self.get_paginated("/organizations").await
    }

    async fn networks(&self, org_id: &str) -> Result<Vec<Network>, ApiError> {
        self.get_paginated(&format!("/organizations/{org_id}/networks"))
            .await
    }

    async fn channel_utilization(
        &self,
        network_id: &str,
    ) -> Result<Vec<AccessPointUtilizationSample>, ApiError> {
        let records: Vec<ApUtilizationRecord> = self
            .get_paginated(&format!(
                "/networks/{network_id}/networkHealth/channelUtilization"
            ))
            .await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn rf_profiles(&self, network_id: &str) -> Result<Vec<RfProfileRecord>, ApiError> {
        self.get_json(&format!("/networks/{network_id}/wireless/rfProfiles"))
            .await
    }
}
