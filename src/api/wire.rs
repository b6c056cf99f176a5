//! Dashboard response shapes and their conversion into the domain model

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::types::{AccessPointUtilizationSample, ChannelWidth, RfProfile};

// ============================================================================
// Channel Utilization
// ============================================================================

/// One element of `GET /networks/{id}/networkHealth/channelUtilization`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApUtilizationRecord {
    pub serial: String,
    #[serde(default)]
    pub model: Option<String>,
    /// 2.4GHz radio
    #[serde(default)]
    pub wifi0: Vec<UtilizationReading>,
    /// 5GHz radio
    #[serde(default)]
    pub wifi1: Vec<UtilizationReading>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UtilizationReading {
    #[serde(default)]
    pub utilization: Option<f64>,
    #[serde(default)]
    pub wifi: Option<f64>,
    #[serde(default)]
    pub non_wifi: Option<f64>,
}

impl From<ApUtilizationRecord> for AccessPointUtilizationSample {
    fn from(record: ApUtilizationRecord) -> Self {
        let readings = record
            .wifi1
            .iter()
            .map(|r| r.utilization.unwrap_or(0.0))
            .collect();
        AccessPointUtilizationSample::new(record.serial, readings)
    }
}

// ============================================================================
// RF Profiles
// ============================================================================

/// One element of `GET /networks/{id}/wireless/rfProfiles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfProfileRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub five_ghz_settings: FiveGhzSettingsRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiveGhzSettingsRecord {
    pub min_power: i64,
    pub min_bitrate: f64,
    #[serde(default)]
    pub channel_width: RawChannelWidth,
    #[serde(default)]
    pub rxsop: Option<i64>,
}

/// `channelWidth` as sent: normally a string, occasionally a bare number.
///
/// Anything else (null, floats, booleans, a missing key) lands in `Other` so
/// it is reported against its profile instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawChannelWidth {
    Text(String),
    Number(i64),
    Other(serde_json::Value),
}

impl Default for RawChannelWidth {
    fn default() -> Self {
        RawChannelWidth::Other(serde_json::Value::Null)
    }
}

impl std::fmt::Display for RawChannelWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawChannelWidth::Text(s) => write!(f, "{s}"),
            RawChannelWidth::Number(n) => write!(f, "{n}"),
            RawChannelWidth::Other(v) => write!(f, "{v}"),
        }
    }
}

impl RfProfileRecord {
    /// Convenience constructor for a record with a textual channel width.
    pub fn new(
        name: impl Into<String>,
        min_power: i64,
        min_bitrate: f64,
        channel_width: impl Into<String>,
        rxsop: Option<i64>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            five_ghz_settings: FiveGhzSettingsRecord {
                min_power,
                min_bitrate,
                channel_width: RawChannelWidth::Text(channel_width.into()),
                rxsop,
            },
        }
    }
}

impl TryFrom<RfProfileRecord> for RfProfile {
    type Error = AuditError;

    fn try_from(record: RfProfileRecord) -> Result<Self, Self::Error> {
        let settings = record.five_ghz_settings;
        let malformed = |value: String| AuditError::MalformedProfileData {
            profile: record.name.clone(),
            value,
        };

        let channel_width = match &settings.channel_width {
            RawChannelWidth::Text(s) => s.parse::<ChannelWidth>().map_err(|e| malformed(e.0))?,
            RawChannelWidth::Number(n) => u32::try_from(*n)
                .ok()
                .filter(|&mhz| mhz > 0)
                .map(ChannelWidth::Fixed)
                .ok_or_else(|| malformed(n.to_string()))?,
            RawChannelWidth::Other(v) => return Err(malformed(v.to_string())),
        };

        Ok(RfProfile {
            name: record.name,
            min_power_dbm: settings.min_power,
            min_bitrate_mbps: settings.min_bitrate,
            channel_width,
            rxsop: settings.rxsop,
        })
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Extract the `rel=next` target from an RFC 5988 `Link` header.
///
/// The dashboard emits `rel=next` unquoted; quoted relations are accepted too.
pub fn next_page_link(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == "rel=next" || param == "rel=\"next\""
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
