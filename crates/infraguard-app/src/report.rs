use anyhow::Context;
use camino::Utf8Path;
use infraguard_domain::{DomainReport, ScanResult};
use infraguard_types::{
    ResultRecord, SCHEMA_REPORT_V1, ScanReport, ScanSummary, Status, ToolMeta,
};
use time::OffsetDateTime;

/// Flatten one domain result into its serialized form.
pub fn record_for(result: &ScanResult) -> ResultRecord {
    let rule = result.rule();
    let reference = result
        .location()
        .map(|m| m.effective_reference())
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    ResultRecord {
        rule_id: rule.long_id(),
        provider: rule.provider,
        service: rule.service.to_string(),
        severity: rule.severity,
        status: result.status(),
        description: result.description().to_string(),
        location: result.range().cloned(),
        reference,
        fingerprint: result.fingerprint(),
        resolution: (result.status() == Status::Failed).then(|| rule.resolution.to_string()),
        links: rule.links.iter().map(|l| l.to_string()).collect(),
    }
}

pub fn build_report(
    domain: &DomainReport,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> ScanReport {
    ScanReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "infraguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        summary: ScanSummary {
            profile: domain.profile.clone(),
            rules_evaluated: domain.rules_evaluated,
            resources_scanned: domain.resources_scanned,
            passed: domain.counts.passed,
            failed: domain.counts.failed,
            ignored: domain.counts.ignored,
            failed_by_severity: domain.failed_by_severity.clone(),
            not_run: domain.not_run.clone(),
        },
        results: domain.results.iter().map(record_for).collect(),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<ScanReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }
    serde_json::from_value(value).context("parse infraguard v1 report")
}

pub fn serialize_report(report: &ScanReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Write the report as pretty JSON, creating parent directories as needed.
pub fn write_report(path: &Utf8Path, report: &ScanReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    let bytes = serialize_report(report)?;
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))
}
