//! Dashboard API access
//!
//! The audit only ever talks to the dashboard through [`DashboardApi`], so
//! checks and aggregation can run against any data source. [`DashboardClient`]
//! is the HTTP implementation; [`SnapshotDashboard`] replays a saved JSON dump.
//!
//! Pagination is fully resolved here: every method returns a complete
//! sequence.

mod client;
mod snapshot;
pub mod wire;

pub use client::DashboardClient;
pub use snapshot::SnapshotDashboard;
pub use wire::{FiveGhzSettingsRecord, RawChannelWidth, RfProfileRecord};

use crate::types::{AccessPointUtilizationSample, Network, Organization};
use async_trait::async_trait;

/// Dashboard API errors (the transport failure class)
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("No API key: set MERAKI_DASHBOARD_API_KEY")]
    MissingApiKey,
    #[error("Pagination did not terminate after {0} pages")]
    TooManyPages(usize),
}

/// Read-only view of the dashboard needed by the audit.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// All organizations visible to the API key.
    async fn organizations(&self) -> Result<Vec<Organization>, ApiError>;

    /// All networks of one organization.
    async fn networks(&self, org_id: &str) -> Result<Vec<Network>, ApiError>;

    /// 5GHz channel-utilization samples for every AP of a network.
    async fn channel_utilization(
        &self,
        network_id: &str,
    ) -> Result<Vec<AccessPointUtilizationSample>, ApiError>;

    /// RF profiles of a network, as returned by the dashboard.
    ///
    /// Records are returned unresolved; see [`RfProfileRecord`] for the
    /// conversion into [`RfProfile`](crate::types::RfProfile).
    async fn rf_profiles(&self, network_id: &str) -> Result<Vec<RfProfileRecord>, ApiError>;
}
