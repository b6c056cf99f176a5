//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausibility checks on threshold values.
//!
//! Two-pass parse: first deserialize raw TOML into `toml::Value`, walk the
//! key tree, compare against known field names, and emit warnings with
//! "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::types::thresholds::rf_thresholds;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `AuditConfig`.
///
/// Any new field added to `AuditConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [thresholds]
        "thresholds",
        "thresholds.channel_utilization_max_percent",
        "thresholds.min_tx_power_max_dbm",
        "thresholds.min_bitrate_min_mbps",
        "thresholds.max_channel_width_mhz",
        // [api]
        "api",
        "api.base_url",
        "api.timeout_secs",
        "api.per_page",
        // [audit]
        "audit",
        "audit.on_network_error",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Parse errors are left to the serde pass and yield no warnings here.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Plausibility Checks
// ============================================================================

/// Warn about values that are legal but unlikely to be intended.
pub fn validate_ranges(config: &super::AuditConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let t = &config.thresholds;

    if !rf_thresholds::STANDARD_CHANNEL_WIDTHS_MHZ.contains(&t.max_channel_width_mhz) {
        warnings.push(ValidationWarning {
            field: "thresholds.max_channel_width_mhz".to_string(),
            message: format!(
                "max_channel_width_mhz = {} is not a standard 802.11 width (20/40/80/160)",
                t.max_channel_width_mhz
            ),
            suggestion: None,
        });
    }

    // Dashboard minPower is configurable between 2 and 30 dBm
    if !(2..=30).contains(&t.min_tx_power_max_dbm) {
        warnings.push(ValidationWarning {
            field: "thresholds.min_tx_power_max_dbm".to_string(),
            message: format!(
                "min_tx_power_max_dbm = {} is outside the configurable range (2-30 dBm)",
                t.min_tx_power_max_dbm
            ),
            suggestion: None,
        });
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("timeout_sec", "timeout_secs"), 1);
    }

    #[test]
    fn test_levenshtein_transposition_costs_two() {
        assert_eq!(levenshtein("per_pgae", "per_page"), 2);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [thresholds]
            max_channel_width_mhz = 40
            [api]
            per_page = 10
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"thresholds".to_string()));
        assert!(keys.contains(&"thresholds.max_channel_width_mhz".to_string()));
        assert!(keys.contains(&"api.per_page".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys("[thresholds]\nmax_chanel_width_mhz = 40\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("max_chanel_width_mhz"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("thresholds.max_channel_width_mhz")
        );
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[thresholds]
channel_utilization_max_percent = 20.0
min_tx_power_max_dbm = 10

[api]
timeout_secs = 30

[audit]
on_network_error = "skip"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_non_standard_width_warns() {
        let mut config = super::super::AuditConfig::default();
        config.thresholds.max_channel_width_mhz = 60;
        let warnings = validate_ranges(&config);
        assert!(warnings.iter().any(|w| w.field.contains("max_channel_width_mhz")));
    }

    #[test]
    fn test_defaults_produce_no_range_warnings() {
        let config = super::super::AuditConfig::default();
        assert!(validate_ranges(&config).is_empty());
    }
}
