//! Audit Configuration Module
//!
//! Provides thresholds, API settings and run policy loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `RF_AUDIT_CONFIG` environment variable (path to TOML file)
//! 3. `rf_audit.toml` in the current working directory
//! 4. Built-in defaults (the stock thresholds)
//!
//! ## Usage
//!
//! There is no global config. Load once in `main()` and pass the
//! [`ThresholdSet`](crate::types::ThresholdSet) down explicitly:
//!
//! ```ignore
//! let config = AuditConfig::load();
//! let report = audit::run_checks(&client, &network, &config.thresholds).await?;
//! ```

mod audit_config;
pub mod defaults;
pub mod validation;

pub use audit_config::*;
