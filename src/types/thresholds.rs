//! RF-health thresholds shared by every check

use serde::{Deserialize, Serialize};

/// Reference limits applied when no config file overrides them
pub mod rf_thresholds {
    /// Peak 5GHz channel utilization above this fails (%)
    pub const CHANNEL_UTILIZATION_MAX_PERCENT: f64 = 20.0;
    /// RF profile minimum TX power above this fails (dBm, excluding antenna gain)
    pub const MIN_TX_POWER_MAX_DBM: i64 = 10;
    /// RF profile minimum bitrate below this fails (Mbps)
    pub const MIN_BITRATE_MIN_MBPS: f64 = 12.0;
    /// RF profile channel width above this fails (MHz)
    pub const MAX_CHANNEL_WIDTH_MHZ: u32 = 40;

    /// Channel widths an 802.11ac/ax radio can actually be set to (MHz)
    pub const STANDARD_CHANNEL_WIDTHS_MHZ: [u32; 4] = [20, 40, 80, 160];
}

/// Immutable set of limits consulted by both evaluators.
///
/// Built once from [`AuditConfig`](crate::config::AuditConfig) and passed by
/// reference into every check. Comparisons are inclusive on the passing side:
/// a value exactly at a limit passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// `ChannelUtilizationMax` (percent, 5GHz)
    #[serde(default = "default_channel_utilization_max")]
    pub channel_utilization_max_percent: f64,

    /// `MinTxPowerMax` (dBm)
    #[serde(default = "default_min_tx_power_max")]
    pub min_tx_power_max_dbm: i64,

    /// `MinBitrateMin` (Mbps)
    #[serde(default = "default_min_bitrate_min")]
    pub min_bitrate_min_mbps: f64,

    /// `MaxChannelWidth` (MHz)
    #[serde(default = "default_max_channel_width")]
    pub max_channel_width_mhz: u32,
}

fn default_channel_utilization_max() -> f64 {
    rf_thresholds::CHANNEL_UTILIZATION_MAX_PERCENT
}
fn default_min_tx_power_max() -> i64 {
    rf_thresholds::MIN_TX_POWER_MAX_DBM
}
fn default_min_bitrate_min() -> f64 {
    rf_thresholds::MIN_BITRATE_MIN_MBPS
}
fn default_max_channel_width() -> u32 {
    rf_thresholds::MAX_CHANNEL_WIDTH_MHZ
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            channel_utilization_max_percent: default_channel_utilization_max(),
            min_tx_power_max_dbm: default_min_tx_power_max(),
            min_bitrate_min_mbps: default_min_bitrate_min(),
            max_channel_width_mhz: default_max_channel_width(),
        }
    }
}

impl ThresholdSet {
    /// True when the observed peak utilization breaches the limit (strict `>`).
    pub fn utilization_exceeded(&self, max_utilization: f64) -> bool {
        max_utilization > self.channel_utilization_max_percent
    }

    pub fn min_power_exceeded(&self, min_power_dbm: i64) -> bool {
        min_power_dbm > self.min_tx_power_max_dbm
    }

    pub fn min_bitrate_too_low(&self, min_bitrate_mbps: f64) -> bool {
        min_bitrate_mbps < self.min_bitrate_min_mbps
    }

    pub fn channel_width_exceeded(&self, width_mhz: u32) -> bool {
        width_mhz > self.max_channel_width_mhz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_limits() {
        let t = ThresholdSet::default();
        assert_eq!(t.channel_utilization_max_percent, 20.0);
        assert_eq!(t.min_tx_power_max_dbm, 10);
        assert_eq!(t.min_bitrate_min_mbps, 12.0);
        assert_eq!(t.max_channel_width_mhz, 40);
    }

    #[test]
    fn test_limits_are_inclusive_on_pass_side() {
        let t = ThresholdSet::default();
        assert!(!t.utilization_exceeded(20.0));
        assert!(t.utilization_exceeded(20.01));
        assert!(!t.min_power_exceeded(10));
        assert!(t.min_power_exceeded(11));
        assert!(!t.min_bitrate_too_low(12.0));
        assert!(t.min_bitrate_too_low(11.0));
        assert!(!t.channel_width_exceeded(40));
        assert!(t.channel_width_exceeded(80));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let t: ThresholdSet = toml::from_str("max_channel_width_mhz = 80").unwrap();
        assert_eq!(t.max_channel_width_mhz, 80);
        assert_eq!(t.min_tx_power_max_dbm, 10);
    }
}
