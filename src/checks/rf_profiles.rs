//! RF profile configuration check
//!
//! Every profile is judged on four independent 5GHz rules. All four are
//! always evaluated so the report shows every problem at once.
//!
//! | Rule            | Fails when                                   |
//! |-----------------|----------------------------------------------|
//! | `min_power`     | min TX power above `min_tx_power_max_dbm`    |
//! | `min_bitrate`   | min bitrate below `min_bitrate_min_mbps`     |
//! | `channel_width` | `auto`, or wider than `max_channel_width_mhz`|
//! | `rxsop`         | any RX-SOP value is configured               |

use tracing::debug;

use crate::api::RfProfileRecord;
use crate::error::AuditError;
use crate::types::{
    ChannelWidth, CheckReport, EntityVerdict, ObservedValue, RfProfile, RuleVerdict, ThresholdSet,
};

/// Rule names carried by every profile verdict
pub mod rules {
    pub const MIN_POWER: &str = "min_power";
    pub const MIN_BITRATE: &str = "min_bitrate";
    pub const CHANNEL_WIDTH: &str = "channel_width";
    pub const RXSOP: &str = "rxsop";

    pub const ALL: [&str; 4] = [MIN_POWER, MIN_BITRATE, CHANNEL_WIDTH, RXSOP];
}

/// Resolve raw dashboard records and evaluate them.
///
/// Fails with [`AuditError::MalformedProfileData`] on the first profile whose
/// channel width cannot be interpreted; no partial report is produced.
pub fn evaluate_records(
    records: Vec<RfProfileRecord>,
    thresholds: &ThresholdSet,
) -> Result<CheckReport, AuditError> {
    let profiles = records
        .into_iter()
        .map(RfProfile::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(evaluate(&profiles, thresholds))
}

/// Evaluate already-resolved profiles of one network.
pub fn evaluate(profiles: &[RfProfile], thresholds: &ThresholdSet) -> CheckReport {
    profiles
        .iter()
        .map(|p| (p.name.clone(), evaluate_profile(p, thresholds)))
        .collect()
}

/// Apply all four rules to one profile.
pub fn evaluate_profile(profile: &RfProfile, thresholds: &ThresholdSet) -> EntityVerdict {
    let min_power = RuleVerdict::unless(
        thresholds.min_power_exceeded(profile.min_power_dbm),
        Some(ObservedValue::from(profile.min_power_dbm)),
    );

    let min_bitrate = RuleVerdict::unless(
        thresholds.min_bitrate_too_low(profile.min_bitrate_mbps),
        Some(ObservedValue::from(profile.min_bitrate_mbps)),
    );

    let width_failed = match profile.channel_width {
        ChannelWidth::Auto => true,
        ChannelWidth::Fixed(mhz) => thresholds.channel_width_exceeded(mhz),
    };
    let channel_width =
        RuleVerdict::unless(width_failed, Some(ObservedValue::from(profile.channel_width)));

    let rxsop = RuleVerdict::unless(
        profile.rxsop.is_some(),
        profile.rxsop.map(ObservedValue::from),
    );

    debug!(
        profile = %profile.name,
        min_power = min_power.passed,
        min_bitrate = min_bitrate.passed,
        channel_width = channel_width.passed,
        rxsop = rxsop.passed,
        "RF profile evaluated"
    );

    EntityVerdict::from_rules([
        (rules::MIN_POWER, min_power),
        (rules::MIN_BITRATE, min_bitrate),
        (rules::CHANNEL_WIDTH, channel_width),
        (rules::RXSOP, rxsop),
    ])
}
