//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "RF_AUDIT_CONFIG";

/// Config file looked up in the working directory when no path is given.
pub const LOCAL_CONFIG_FILE: &str = "rf_audit.toml";

// ============================================================================
// Dashboard API
// ============================================================================

/// Environment variable holding the dashboard API key.
///
/// Same variable the vendor SDKs read, so existing shells keep working.
pub const API_KEY_ENV: &str = "MERAKI_DASHBOARD_API_KEY";

/// Dashboard v1 REST base URL.
pub const API_BASE_URL: &str = "https://api.meraki.com/api/v1";

/// HTTP client timeout for dashboard requests (seconds).
pub const API_TIMEOUT_SECS: u64 = 30;

/// Page size requested from paginated endpoints.
pub const API_PER_PAGE: u32 = 100;

/// Upper bound on pages followed for one collection.
///
/// Guards against a server that keeps returning a `rel=next` link.
pub const MAX_PAGES: usize = 1_000;

/// User agent sent with every request (`Application Vendor` format).
pub const USER_AGENT: &str = concat!("RfAudit/", env!("CARGO_PKG_VERSION"), " RfAudit");

// ============================================================================
// Rendering
// ============================================================================

/// Width of the separator printed between networks.
pub const SEPARATOR_WIDTH: usize = 100;
