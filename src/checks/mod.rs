//! Wireless RF-health checks
//!
//! Checks are pure: they take already-fetched data plus a
//! [`ThresholdSet`](crate::types::ThresholdSet) and return a
//! [`CheckReport`](crate::types::CheckReport). They never print; fetching
//! and presentation live in [`audit`](crate::audit) and
//! [`render`](crate::render).
//!
//! ## Checks
//!
//! 1. **Channel utilization** - peak 5GHz utilization per AP
//! 2. **RF profiles** - min power, min bitrate, channel width and RX-SOP per profile

pub mod channel_utilization;
pub mod rf_profiles;
