//! The `scan` use case: resolve config, evaluate rules, and produce a report.

use anyhow::Context;
use infraguard_domain::{Cancellation, Registry, scan_with};
use infraguard_settings::{InfraguardConfigV1, Overrides, ResolvedConfig};
use infraguard_state::State;
use infraguard_types::ScanReport;
use time::OffsetDateTime;
use tracing::info;

use crate::report::build_report;

/// Input for the scan use case.
#[derive(Clone, Debug)]
pub struct ScanInput<'a> {
    pub state: &'a State,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub cancel: Option<&'a Cancellation>,
}

/// Output from the scan use case.
#[derive(Clone, Debug)]
pub struct ScanOutput {
    pub report: ScanReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the scan use case: parse config, evaluate the selected rules, produce the report.
pub fn run_scan(registry: &Registry, input: ScanInput<'_>) -> anyhow::Result<ScanOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        InfraguardConfigV1::default()
    } else {
        infraguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = infraguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let domain = scan_with(registry, input.state, &resolved.effective, input.cancel)
        .context("evaluate rules")?;

    let finished_at = OffsetDateTime::now_utc();
    info!(
        profile = %domain.profile,
        failed = domain.counts.failed,
        elapsed_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64,
        "scan complete"
    );

    Ok(ScanOutput {
        report: build_report(&domain, started_at, finished_at),
        resolved_config: resolved,
    })
}

/// Map a report to an exit code: 0 = no failures, 2 = at least one failed result.
pub fn failure_exit_code(report: &ScanReport) -> i32 {
    if report.summary.failed > 0 { 2 } else { 0 }
}
