//! Snapshot dashboard: audit a saved JSON dump instead of the live API
//!
//! Lets an audit be replayed offline and reproduced exactly. The file layout
//! mirrors the four API calls:
//!
//! ```json
//! {
//!   "organizations": [{"id": "O_1", "name": "Acme"}],
//!   "networks": {"O_1": [{"id": "N_1", "name": "HQ", "productTypes": ["wireless"]}]},
//!   "channel_utilization": {"N_1": [{"serial": "Q2KD-0001", "readings": [5.0, 22.0]}]},
//!   "rf_profiles": {"N_1": [{"name": "Default", "fiveGhzSettings": {
//!       "minPower": 8, "minBitrate": 12, "channelWidth": "40", "rxsop": null}}]}
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{ApiError, DashboardApi, RfProfileRecord};
use crate::error::AuditError;
use crate::types::{AccessPointUtilizationSample, Network, Organization};

/// In-memory dashboard backed by a snapshot document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotDashboard {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    /// Networks keyed by organization id
    #[serde(default)]
    pub networks: HashMap<String, Vec<Network>>,
    /// Samples keyed by network id
    #[serde(default)]
    pub channel_utilization: HashMap<String, Vec<AccessPointUtilizationSample>>,
    /// RF profiles keyed by network id
    #[serde(default)]
    pub rf_profiles: HashMap<String, Vec<RfProfileRecord>>,
}

impl SnapshotDashboard {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let contents = std::fs::read(path)?;
        serde_json::from_slice(&contents).map_err(|e| AuditError::Transport(ApiError::Decode(e)))
    }

    pub fn with_organization(mut self, org: Organization) -> Self {
        self.organizations.push(org);
        self
    }

    pub fn with_network(mut self, org_id: &str, network: Network) -> Self {
        self.networks.entry(org_id.to_string()).or_default().push(network);
        self
    }

    pub fn with_utilization(
        mut self,
        network_id: &str,
        samples: Vec<AccessPointUtilizationSample>,
    ) -> Self {
        self.channel_utilization.insert(network_id.to_string(), samples);
        self
    }

    pub fn with_rf_profiles(mut self, network_id: &str, records: Vec<RfProfileRecord>) -> Self {
        self.rf_profiles.insert(network_id.to_string(), records);
        self
    }
}

#[async_trait]
impl DashboardApi for SnapshotDashboard {
    async fn organizations(&self) -> Result<Vec<Organization>, ApiError> {
        Ok(self.organizations.clone())
    }

    async fn networks(&self, org_id: &str) -> Result<Vec<Network>, ApiError> {
        self.networks
            .get(org_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: format!("snapshot:/organizations/{org_id}/networks"),
            })
    }

    async fn channel_utilization(
        &self,
        network_id: &str,
    ) -> Result<Vec<AccessPointUtilizationSample>, ApiError> {
        Ok(self
            .channel_utilization
            .get(network_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn rf_profiles(&self, network_id: &str) -> Result<Vec<RfProfileRecord>, ApiError> {
        Ok(self.rf_profiles.get(network_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "organizations": [{"id": "O_1", "name": "Acme"}],
        "networks": {"O_1": [{"id": "N_1", "name": "HQ", "productTypes": ["wireless"]}]},
        "channel_utilization": {"N_1": [{"serial": "Q2KD-0001", "readings": [5.0, 22.0]}]},
        "rf_profiles": {"N_1": [{"name": "Default", "fiveGhzSettings": {
            "minPower": 8, "minBitrate": 12, "channelWidth": "40", "rxsop": null}}]}
    }"#;

    #[test]
    fn test_snapshot_document_parses() {
        let snap: SnapshotDashboard = serde_json::from_str(SNAPSHOT).unwrap();
        assert_eq!(snap.organizations.len(), 1);
        assert_eq!(snap.networks["O_1"][0].name, "HQ");
        assert_eq!(snap.rf_profiles["N_1"][0].name, "Default");
    }

    #[test]
    fn test_unknown_org_is_not_found() {
        let snap = SnapshotDashboard::default();
        let err = tokio_test::block_on(snap.networks("O_missing")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, SNAPSHOT).unwrap();
        let snap = SnapshotDashboard::load(&path).unwrap();
        let samples = tokio_test::block_on(snap.channel_utilization("N_1")).unwrap();
        assert_eq!(samples[0].max_utilization(), 22.0);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SnapshotDashboard::load(&path),
            Err(AuditError::Transport(ApiError::Decode(_)))
        ));
    }
}
