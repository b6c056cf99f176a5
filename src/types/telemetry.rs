//! Radio telemetry and RF configuration consumed by the checks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Channel Utilization
// ============================================================================

/// Per-AP 5GHz channel-utilization readings for one sampling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPointUtilizationSample {
    /// AP serial number (e.g. `Q2KD-XXXX-XXXX`)
    pub serial: String,
    /// Utilization readings for the 5GHz radio (%), one per interval
    #[serde(default)]
    pub readings: Vec<f64>,
}

impl AccessPointUtilizationSample {
    pub fn new(serial: impl Into<String>, readings: Vec<f64>) -> Self {
        Self {
            serial: serial.into(),
            readings,
        }
    }

    /// Peak reading across the window; zero when there are no readings.
    pub fn max_utilization(&self) -> f64 {
        self.readings.iter().copied().fold(0.0, f64::max)
    }

    /// A radio that never reported utilization is treated as disabled.
    pub fn band_disabled(&self) -> bool {
        self.max_utilization() == 0.0
    }
}

// ============================================================================
// Channel Width
// ============================================================================

/// Configured 5GHz channel width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelWidth {
    /// Width chosen by the dashboard's auto channel planning
    Auto,
    /// Fixed width in MHz
    Fixed(u32),
}

/// A channel width that is neither `"auto"` nor a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid channel width '{0}': expected \"auto\" or a positive integer MHz value")]
pub struct InvalidChannelWidth(pub String);

impl FromStr for ChannelWidth {
    type Err = InvalidChannelWidth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "auto" {
            return Ok(ChannelWidth::Auto);
        }
        trimmed
            .parse::<u32>()
            .ok()
            .filter(|&mhz| mhz > 0)
            .map(ChannelWidth::Fixed)
            .ok_or_else(|| InvalidChannelWidth(s.to_string()))
    }
}

impl fmt::Display for ChannelWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelWidth::Auto => write!(f, "auto"),
            ChannelWidth::Fixed(mhz) => write!(f, "{mhz}"),
        }
    }
}

impl Serialize for ChannelWidth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChannelWidth::Auto => serializer.serialize_str("auto"),
            ChannelWidth::Fixed(mhz) => serializer.serialize_u32(*mhz),
        }
    }
}

// ============================================================================
// RF Profile
// ============================================================================

/// The rule-relevant 5GHz settings of one RF profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfProfile {
    /// Profile name, unique within its network
    pub name: String,
    pub min_power_dbm: i64,
    pub min_bitrate_mbps: f64,
    pub channel_width: ChannelWidth,
    /// RX-SOP threshold; `Some` means it has been configured
    pub rxsop: Option<i64>,
}
