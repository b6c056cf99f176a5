//! RF Audit - wireless RF-health compliance snapshot
//!
//! Audits every wireless network of a dashboard organization against the
//! configured RF thresholds and prints per-network verdicts.
//!
//! # Usage
//!
//! ```bash
//! # Pick the organization interactively
//! MERAKI_DASHBOARD_API_KEY=... rf-audit
//!
//! # Non-interactive, with a JSON report
//! rf-audit --org-id 123456 --json report.json
//!
//! # Replay a saved snapshot without network access
//! rf-audit --snapshot snapshot.json --org-id O_1
//! ```
//!
//! # Environment Variables
//!
//! - `MERAKI_DASHBOARD_API_KEY`: Dashboard API key (required for live audits)
//! - `RF_AUDIT_CONFIG`: Path to the TOML config (default: ./rf_audit.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use rf_audit::api::{DashboardApi, DashboardClient, SnapshotDashboard};
use rf_audit::render::{self, AuditExport};
use rf_audit::{audit, selection, AuditConfig, NetworkErrorPolicy};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rf-audit")]
#[command(about = "Audit wireless networks against RF-health thresholds")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides RF_AUDIT_CONFIG and ./rf_audit.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Organization id to audit; prompts for a selection when omitted
    #[arg(long, env = "RF_AUDIT_ORG_ID")]
    org_id: Option<String>,

    /// Read dashboard data from a JSON snapshot instead of the live API
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Write the audit result as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Continue with the next network when one network's checks fail
    /// (overrides audit.on_network_error)
    #[arg(long)]
    skip_failed: bool,

    /// Only print the summary line
    #[arg(short, long)]
    quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AuditConfig> {
    match path {
        Some(p) => AuditConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(AuditConfig::load()),
    }
}

fn open_dashboard(args: &CliArgs, config: &AuditConfig) -> Result<Box<dyn DashboardApi>> {
    if let Some(path) = &args.snapshot {
        info!(path = %path.display(), "Reading dashboard snapshot");
        let snapshot = SnapshotDashboard::load(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
        return Ok(Box::new(snapshot));
    }

    let client = DashboardClient::from_config(&config.api)
        .context("Failed to initialise dashboard client")?;
    info!(base_url = client.base_url(), "Using live dashboard API");
    Ok(Box::new(client))
}

async fn resolve_org_id(api: &dyn DashboardApi, requested: Option<String>) -> Result<String> {
    if let Some(id) = requested {
        return Ok(id);
    }

    println!("\n\nFetching organizations...\n");
    let organizations = api
        .organizations()
        .await
        .context("Failed to list organizations")?;
    render::print_organizations(&organizations);

    let org_id = tokio::task::spawn_blocking(move || {
        selection::select_organization(
            &organizations,
            std::io::stdin().lock(),
            std::io::stdout(),
        )
    })
    .await??;
    Ok(org_id)
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    let config = load_config(args.config.as_ref())?;
    let thresholds = config.thresholds;
    let policy = if args.skip_failed {
        NetworkErrorPolicy::Skip
    } else {
        config.audit.on_network_error
    };
    info!(
        utilization_max = thresholds.channel_utilization_max_percent,
        min_power_max = thresholds.min_tx_power_max_dbm,
        min_bitrate_min = thresholds.min_bitrate_min_mbps,
        channel_width_max = thresholds.max_channel_width_mhz,
        ?policy,
        "Thresholds loaded"
    );

    let api = open_dashboard(&args, &config)?;
    let org_id = resolve_org_id(api.as_ref(), args.org_id.clone()).await?;

    let run = audit::audit_organization(api.as_ref(), &org_id, &thresholds, policy)
        .await
        .with_context(|| format!("Audit of organization {org_id} failed"))?;

    if args.quiet {
        println!(
            "{}",
            render::summary_line(&run.result.summary(), run.failures.len())
        );
    } else {
        render::print_run(&run);
    }

    if let Some(path) = &args.json {
        AuditExport::new(&org_id, &thresholds, &run)
            .write_to(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Audit result written");
    }

    Ok(())
}
