//! Audit aggregation
//!
//! Runs both wireless checks per network and folds the reports into one
//! [`AuditResult`] keyed by network name. Networks are processed one at a
//! time; each [`NetworkReport`] is built independently, so a failure on one
//! network never alters reports already collected for others.

use tracing::{debug, info, warn};

use crate::api::DashboardApi;
use crate::checks::{channel_utilization, rf_profiles};
use crate::config::NetworkErrorPolicy;
use crate::error::AuditError;
use crate::types::{AuditResult, CheckKind, Network, NetworkReport, ProductType, ThresholdSet};

/// A network whose checks did not complete under [`NetworkErrorPolicy::Skip`].
#[derive(Debug)]
pub struct NetworkFailure {
    pub network: String,
    pub error: AuditError,
}

/// Outcome of a whole audit run.
#[derive(Debug, Default)]
pub struct AuditRun {
    /// Pruned verdict tree
    pub result: AuditResult,
    /// Networks skipped because their checks failed
    pub failures: Vec<NetworkFailure>,
}

/// Run every applicable check for one network.
///
/// Networks without wireless get an empty report, which the aggregator
/// prunes. Errors from the API or from malformed profile data propagate.
pub async fn run_checks<A>(
    api: &A,
    network: &Network,
    thresholds: &ThresholdSet,
) -> Result<NetworkReport, AuditError>
where
    A: DashboardApi + ?Sized,
{
    let mut report = NetworkReport::new();

    if network.supports_wireless() {
        let samples = api.channel_utilization(&network.id).await?;
        report.insert(
            CheckKind::ChannelUtilization,
            channel_utilization::evaluate(&samples, thresholds),
        );

        let records = api.rf_profiles(&network.id).await?;
        report.insert(
            CheckKind::RfProfiles,
            rf_profiles::evaluate_records(records, thresholds)?,
        );
    }

    if network.has_product(&ProductType::Switch) {
        debug!(network = %network.name, "Wired checks not implemented, skipping switch");
    }

    Ok(report)
}

/// Audit a list of networks and return the pruned result.
pub async fn run_audit<A>(
    api: &A,
    networks: &[Network],
    thresholds: &ThresholdSet,
    policy: NetworkErrorPolicy,
) -> Result<AuditRun, AuditError>
where
    A: DashboardApi + ?Sized,
{
    let mut reports: Vec<(String, NetworkReport)> = Vec::with_capacity(networks.len());
    let mut failures = Vec::new();

    for network in networks {
        match run_checks(api, network, thresholds).await {
            Ok(report) => {
                if !report.is_empty() {
                    info!(
                        network = %network.name,
                        passed = report.passed(),
                        "Network audited"
                    );
                }
                reports.push((network.name.clone(), report));
            }
            Err(e) => match policy {
                NetworkErrorPolicy::Abort => return Err(e),
                NetworkErrorPolicy::Skip => {
                    warn!(
                        network = %network.name,
                        data_error = e.is_data_error(),
                        error = %e,
                        "Network audit failed, skipping"
                    );
                    failures.push(NetworkFailure {
                        network: network.name.clone(),
                        error: e,
                    });
                }
            },
        }
    }

    Ok(AuditRun {
        result: reports.into_iter().collect(),
        failures,
    })
}

/// List an organization's networks and audit all of them.
pub async fn audit_organization<A>(
    api: &A,
    org_id: &str,
    thresholds: &ThresholdSet,
    policy: NetworkErrorPolicy,
) -> Result<AuditRun, AuditError>
where
    A: DashboardApi + ?Sized,
{
    let networks = api.networks(org_id).await?;
    info!(org_id, networks = networks.len(), "Auditing organization");
    run_audit(api, &networks, thresholds, policy).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RfProfileRecord, SnapshotDashboard};
    use crate::types::AccessPointUtilizationSample;

    fn network(id: &str, name: &str, products: &[ProductType]) -> Network {
        Network {
            id: id.to_string(),
            name: name.to_string(),
            product_types: products.to_vec(),
        }
    }

    #[test]
    fn test_non_wireless_network_gets_empty_report() {
        let api = SnapshotDashboard::default();
        let net = network("N_1", "Wired", &[ProductType::Switch]);
        let report =
            tokio_test::block_on(run_checks(&api, &net, &ThresholdSet::default())).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_wireless_network_without_data_keeps_both_checks() {
        let api = SnapshotDashboard::default();
        let net = network("N_1", "Empty Wifi", &[ProductType::Wireless]);
        let report =
            tokio_test::block_on(run_checks(&api, &net, &ThresholdSet::default())).unwrap();

        assert!(report.check(CheckKind::ChannelUtilization).unwrap().is_empty());
        assert!(report.check(CheckKind::RfProfiles).unwrap().is_empty());
        assert!(report.passed());
    }

    #[test]
    fn test_run_audit_prunes_and_keys_by_name() {
        let api = SnapshotDashboard::default()
            .with_utilization("N_1", vec![AccessPointUtilizationSample::new("S1", vec![5.0, 22.0])])
            .with_rf_profiles("N_1", vec![RfProfileRecord::new("P1", 5, 24.0, "20", None)]);
        let networks = vec![
            network("N_1", "Office", &[ProductType::Wireless]),
            network("N_2", "Camera Net", &[ProductType::Camera]),
        ];

        let run = tokio_test::block_on(run_audit(
            &api,
            &networks,
            &ThresholdSet::default(),
            NetworkErrorPolicy::Abort,
        ))
        .unwrap();

        assert_eq!(run.result.len(), 1);
        assert!(run.result.network("Camera Net").is_none());
        let office = run.result.network("Office").unwrap();
        assert!(!office.check(CheckKind::ChannelUtilization).unwrap().passed());
        assert!(office.check(CheckKind::RfProfiles).unwrap().passed());
        assert!(run.failures.is_empty());
    }

    #[test]
    fn test_malformed_profile_aborts_by_default() {
        let api = SnapshotDashboard::default()
            .with_rf_profiles("N_1", vec![RfProfileRecord::new("P1", 5, 24.0, "wide", None)]);
        let networks = vec![network("N_1", "Office", &[ProductType::Wireless])];

        let err = tokio_test::block_on(run_audit(
            &api,
            &networks,
            &ThresholdSet::default(),
            NetworkErrorPolicy::Abort,
        ))
        .unwrap_err();
        assert!(matches!(err, AuditError::MalformedProfileData { .. }));
    }

    #[test]
    fn test_skip_policy_isolates_failing_network() {
        let api = SnapshotDashboard::default()
            .with_rf_profiles("N_1", vec![RfProfileRecord::new("P1", 5, 24.0, "wide", None)])
            .with_rf_profiles("N_2", vec![RfProfileRecord::new("P2", 5, 24.0, "40", None)]);
        let networks = vec![
            network("N_1", "Broken", &[ProductType::Wireless]),
            network("N_2", "Healthy", &[ProductType::Wireless]),
        ];

        let run = tokio_test::block_on(run_audit(
            &api,
            &networks,
            &ThresholdSet::default(),
            NetworkErrorPolicy::Skip,
        ))
        .unwrap();

        assert_eq!(run.failures.len(), 1);
        assert_eq!(run.failures[0].network, "Broken");
        assert!(run.result.network("Broken").is_none());
        assert!(run.result.network("Healthy").unwrap().passed());
    }
}
