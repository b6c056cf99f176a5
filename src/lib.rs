//! RF Audit: wireless RF-health compliance snapshots
//!
//! Pulls channel-utilization telemetry and RF-profile configuration from the
//! dashboard API and judges them against a fixed [`ThresholdSet`].
//!
//! ## Architecture
//!
//! - **Checks**: pure evaluators turning API data into verdicts
//! - **Audit**: per-network aggregation into a pruned [`AuditResult`]
//! - **API**: [`DashboardApi`] trait with HTTP and snapshot implementations
//! - **Render**: tables and JSON export for the finished verdict tree

pub mod api;
pub mod audit;
pub mod checks;
pub mod config;
pub mod error;
pub mod render;
pub mod selection;
pub mod types;

// Re-export configuration
pub use config::{AuditConfig, ConfigError, NetworkErrorPolicy};

// Re-export commonly used types
pub use types::{
    AccessPointUtilizationSample, AuditResult, ChannelWidth, CheckKind, CheckReport,
    EntityVerdict, Network, NetworkReport, ObservedValue, Organization, ProductType, RfProfile,
    RuleVerdict, ThresholdSet,
};

// Re-export API access
pub use api::{ApiError, DashboardApi, DashboardClient, SnapshotDashboard};

// Re-export aggregation
pub use audit::{audit_organization, run_audit, run_checks, AuditRun, NetworkFailure};

pub use error::AuditError;
