//! 5GHz channel-utilization check
//!
//! Each AP is judged on its peak 5GHz utilization over the sampling window.
//! APs whose radio reported nothing above zero are treated as having the band
//! disabled and are left out of the report entirely.

use tracing::debug;

use crate::types::{
    AccessPointUtilizationSample, CheckReport, EntityVerdict, ObservedValue, RuleVerdict,
    ThresholdSet,
};

/// Rule name carried by every AP verdict.
pub const UTILIZATION_RULE: &str = "utilization";

/// Evaluate every AP sample of one network.
pub fn evaluate(samples: &[AccessPointUtilizationSample], thresholds: &ThresholdSet) -> CheckReport {
    samples
        .iter()
        .filter_map(|sample| evaluate_sample(sample, thresholds).map(|v| (sample.serial.clone(), v)))
        .collect()
}

/// Verdict for one AP, or `None` when its 5GHz radio is disabled.
pub fn evaluate_sample(
    sample: &AccessPointUtilizationSample,
    thresholds: &ThresholdSet,
) -> Option<EntityVerdict> {
    let max_util = sample.max_utilization();
    if max_util == 0.0 {
        debug!(serial = %sample.serial, "5GHz not enabled, skipping");
        return None;
    }

    let exceeded = thresholds.utilization_exceeded(max_util);
    debug!(
        serial = %sample.serial,
        max_util,
        limit = thresholds.channel_utilization_max_percent,
        exceeded,
        "5GHz channel utilization evaluated"
    );

    Some(EntityVerdict::from_rules([(
        UTILIZATION_RULE,
        RuleVerdict::unless(exceeded, Some(ObservedValue::from(max_util))),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds(limit: f64) -> ThresholdSet {
        ThresholdSet {
            channel_utilization_max_percent: limit,
            ..ThresholdSet::default()
        }
    }

    #[test]
    fn test_peak_above_limit_fails() {
        // 22% peak against a 20% limit
        let samples = vec![AccessPointUtilizationSample::new("S1", vec![5.0, 22.0])];
        let report = evaluate(&samples, &thresholds(20.0));

        assert!(!report.passed());
        let s1 = report.entity("S1").unwrap();
        assert!(!s1.passed());
        let rule = s1.rule(UTILIZATION_RULE).unwrap();
        assert!(!rule.passed);
        assert_eq!(rule.observed, Some(ObservedValue::Float(22.0)));
    }

    #[test]
    fn test_disabled_band_is_excluded() {
        let samples = vec![AccessPointUtilizationSample::new("S1", vec![0.0, 0.0])];
        let report = evaluate(&samples, &thresholds(20.0));

        assert!(report.passed());
        assert!(report.entity("S1").is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn test_no_readings_is_excluded() {
        let samples = vec![AccessPointUtilizationSample::new("S1", vec![])];
        assert!(evaluate(&samples, &thresholds(20.0)).is_empty());
    }

    #[test]
    fn test_peak_equal_to_limit_passes() {
        let samples = vec![AccessPointUtilizationSample::new("S1", vec![20.0, 3.0])];
        let report = evaluate(&samples, &thresholds(20.0));
        assert!(report.passed());
        assert!(report.entity("S1").unwrap().passed());
    }

    #[test]
    fn test_below_limit_passes_with_observed_value() {
        let samples = vec![AccessPointUtilizationSample::new("S1", vec![16.93])];
        let report = evaluate(&samples, &thresholds(20.0));
        let rule = report.entity("S1").unwrap().rule(UTILIZATION_RULE).unwrap();
        assert!(rule.passed);
        assert_eq!(rule.observed, Some(ObservedValue::Float(16.93)));
    }

    #[test]
    fn test_mixed_fleet() {
        let samples = vec![
            AccessPointUtilizationSample::new("A", vec![51.66]),
            AccessPointUtilizationSample::new("B", vec![16.93]),
            AccessPointUtilizationSample::new("C", vec![0.0]),
            AccessPointUtilizationSample::new("D", vec![10.0, 59.48]),
        ];
        let report = evaluate(&samples, &thresholds(20.0));

        assert!(!report.passed());
        assert_eq!(report.len(), 3);
        assert_eq!(report.failed_count(), 2);
        assert!(report.entity("B").unwrap().passed());
        assert!(report.entity("C").is_none());
    }

    #[test]
    fn test_empty_network_passes_vacuously() {
        let report = evaluate(&[], &ThresholdSet::default());
        assert!(report.passed());
        assert!(report.is_empty());
    }
}
