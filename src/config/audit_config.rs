//! Audit Configuration - thresholds, API settings and run policy as TOML
//!
//! Every struct implements `Default` with the stock values, so a run
//! without any config file audits against the stock limits.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::ThresholdSet;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an audit run.
///
/// Load with `AuditConfig::load()` which searches:
/// 1. `$RF_AUDIT_CONFIG` env var
/// 2. `./rf_audit.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// RF-health limits applied by the checks
    #[serde(default)]
    pub thresholds: ThresholdSet,

    /// Dashboard API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Run policy
    #[serde(default)]
    pub audit: AuditOptions,
}

impl AuditConfig {
    /// Load configuration using the standard search order:
    /// 1. `$RF_AUDIT_CONFIG` environment variable
    /// 2. `./rf_audit.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded audit config from RF_AUDIT_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from RF_AUDIT_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "RF_AUDIT_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./rf_audit.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded audit config from ./rf_audit.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./rf_audit.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No rf_audit.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings; they never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate thresholds and API settings.
    ///
    /// Rules:
    /// - Thresholds must be finite and positive; utilization must be a percentage
    /// - The API base URL must be an http(s) URL
    /// - Timeout and page size must be > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let mut errors: Vec<String> = Vec::new();

        let util = t.channel_utilization_max_percent;
        if !util.is_finite() || util <= 0.0 || util > 100.0 {
            errors.push(format!(
                "thresholds.channel_utilization_max_percent ({util}) must be within (0, 100]"
            ));
        }
        let bitrate = t.min_bitrate_min_mbps;
        if !bitrate.is_finite() || bitrate <= 0.0 {
            errors.push(format!(
                "thresholds.min_bitrate_min_mbps ({bitrate}) must be a positive number"
            ));
        }
        if t.max_channel_width_mhz == 0 {
            errors.push("thresholds.max_channel_width_mhz must be > 0".to_string());
        }

        let api = &self.api;
        if !(api.base_url.starts_with("https://") || api.base_url.starts_with("http://")) {
            errors.push(format!(
                "api.base_url ('{}') must start with http:// or https://",
                api.base_url
            ));
        }
        if api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be > 0".to_string());
        }
        if api.per_page == 0 {
            errors.push("api.per_page must be > 0".to_string());
        }

        for w in super::validation::validate_ranges(self) {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// API Config
// ============================================================================

/// Dashboard connection settings. The API key is never read from the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size for paginated collections
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_base_url() -> String {
    defaults::API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    defaults::API_TIMEOUT_SECS
}
fn default_per_page() -> u32 {
    defaults::API_PER_PAGE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            per_page: default_per_page(),
        }
    }
}

// ============================================================================
// Audit Options
// ============================================================================

/// What to do when one network's checks fail to complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkErrorPolicy {
    /// Stop the audit and return the error
    #[default]
    Abort,
    /// Log, record the failure and continue with the next network
    Skip,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditOptions {
    #[serde(default)]
    pub on_network_error: NetworkErrorPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AuditConfig::default().validate().is_ok());
    }

    #[test]
    fn test_full_document_parses() {
        let config = AuditConfig::from_toml_str(
            r#"
[thresholds]
channel_utilization_max_percent = 35.0
min_tx_power_max_dbm = 8
min_bitrate_min_mbps = 24.0
max_channel_width_mhz = 80

[api]
base_url = "https://n123.meraki.com/api/v1"
timeout_secs = 10
per_page = 50

[audit]
on_network_error = "skip"
"#,
        )
        .unwrap();
        assert_eq!(config.thresholds.channel_utilization_max_percent, 35.0);
        assert_eq!(config.thresholds.max_channel_width_mhz, 80);
        assert_eq!(config.api.per_page, 50);
        assert_eq!(config.audit.on_network_error, NetworkErrorPolicy::Skip);
    }

    #[test]
    fn test_empty_document_is_defaults() {
        let config = AuditConfig::from_toml_str("").unwrap();
        assert_eq!(config.thresholds, ThresholdSet::default());
        assert_eq!(config.api.base_url, defaults::API_BASE_URL);
        assert_eq!(config.audit.on_network_error, NetworkErrorPolicy::Abort);
    }

    #[test]
    fn test_utilization_above_100_rejected() {
        let err = AuditConfig::from_toml_str(
            "[thresholds]\nchannel_utilization_max_percent = 150.0\n",
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.contains("channel_utilization_max_percent")));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let err = AuditConfig::from_toml_str("[api]\nbase_url = \"ftp://example\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = AuditConfig::from_toml_str("[thresholds]\nmax_channel_width_mhz = \"wide\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_, _)));
    }

    #[test]
    fn test_toml_roundtrip_preserves_policy() {
        let mut config = AuditConfig::default();
        config.audit.on_network_error = NetworkErrorPolicy::Skip;
        let text = config.to_toml().unwrap();
        assert!(text.contains("on_network_error = \"skip\""));
    }
}
