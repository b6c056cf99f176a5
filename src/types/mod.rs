//! Shared data structures for the RF-health audit
//!
//! - Network inventory: [`Organization`], [`Network`], [`ProductType`]
//! - Check inputs: [`AccessPointUtilizationSample`], [`RfProfile`], [`ChannelWidth`]
//! - Limits: [`ThresholdSet`]
//! - Outputs: [`RuleVerdict`] → [`EntityVerdict`] → [`CheckReport`] →
//!   [`NetworkReport`] → [`AuditResult`]

mod network;
mod telemetry;
pub mod thresholds;
mod verdict;

pub use network::*;
pub use telemetry::*;
pub use thresholds::ThresholdSet;
pub use verdict::*;
