//! Configured scans: rule selection, suppression, and evaluation in one pure call.

use crate::engine::{Cancellation, EvalOptions, evaluate_with};
use crate::error::ScanError;
use crate::policy::EffectiveConfig;
use crate::registry::Registry;
use crate::result::{Results, StatusCounts};
use crate::suppress::{IgnoreList, Suppressor};
use infraguard_state::State;
use infraguard_types::SeverityCounts;
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub profile: String,
    /// Results in canonical order.
    pub results: Results,
    pub counts: StatusCounts,
    /// Failed results per severity.
    pub failed_by_severity: SeverityCounts,
    /// Rules selected but skipped because the scan was cancelled.
    pub not_run: Vec<String>,
    pub rules_evaluated: u32,
    pub resources_scanned: u32,
}

impl DomainReport {
    pub fn has_failures(&self) -> bool {
        self.counts.failed > 0
    }
}

pub fn scan(
    registry: &Registry,
    state: &State,
    cfg: &EffectiveConfig,
) -> Result<DomainReport, ScanError> {
    scan_with(registry, state, cfg, None)
}

pub fn scan_with(
    registry: &Registry,
    state: &State,
    cfg: &EffectiveConfig,
    cancel: Option<&Cancellation>,
) -> Result<DomainReport, ScanError> {
    if let Some(id) = cfg.rules.keys().find(|id| !registry.contains(id)) {
        return Err(ScanError::UnknownRule { id: id.clone() });
    }
    let ignores = IgnoreList::compile(&cfg.ignores)?;

    let selected = registry.select(&cfg.rule_filter());
    debug!(
        selected = selected.len(),
        registered = registry.len(),
        profile = %cfg.profile,
        "rules selected"
    );

    let evaluation = evaluate_with(
        selected.as_slice(),
        state,
        EvalOptions {
            parallel: cfg.parallel,
            cancel,
            suppressor: (!ignores.is_empty()).then_some(&ignores as &dyn Suppressor),
        },
    );

    let mut results = evaluation.results;
    results.sort_canonical();
    let counts = results.counts();
    info!(
        passed = counts.passed,
        failed = counts.failed,
        ignored = counts.ignored,
        "scan finished"
    );

    Ok(DomainReport {
        profile: cfg.profile.clone(),
        failed_by_severity: results.severity_counts(),
        counts,
        results,
        rules_evaluated: (selected.len() - evaluation.not_run.len()) as u32,
        not_run: evaluation.not_run,
        resources_scanned: state.resource_count() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{IgnorePolicy, RulePolicy};
    use crate::test_support::{bucket, state_with_buckets, with_versioning};
    use infraguard_types::{Severity, Status, ids};

    fn registry() -> Registry {
        Registry::builtin().expect("builtin registry")
    }

    fn only(id: &str) -> EffectiveConfig {
        let mut cfg = EffectiveConfig {
            min_severity: Severity::Critical,
            ..EffectiveConfig::default()
        };
        cfg.rules.insert(
            id.to_string(),
            RulePolicy {
                enabled: Some(true),
            },
        );
        cfg
    }

    #[test]
    fn unknown_rule_in_config_is_rejected() {
        let mut cfg = EffectiveConfig::default();
        cfg.rules
            .insert("aws-s3-nope".to_string(), RulePolicy { enabled: None });
        let err = scan(&registry(), &State::default(), &cfg).unwrap_err();
        assert!(matches!(err, ScanError::UnknownRule { id } if id == "aws-s3-nope"));
    }

    #[test]
    fn configured_rule_without_override_keeps_profile_selection() {
        let mut cfg = EffectiveConfig {
            min_severity: Severity::High,
            ..EffectiveConfig::default()
        };
        cfg.rules.insert(
            ids::RULE_AWS_S3_ENABLE_VERSIONING.to_string(),
            RulePolicy { enabled: None },
        );
        let report = scan(&registry(), &State::default(), &cfg).expect("scan");
        assert!(
            report
                .results
                .for_rule(ids::RULE_AWS_S3_ENABLE_VERSIONING)
                .next()
                .is_none()
        );
        assert_eq!(report.rules_evaluated, 6);
    }

    #[test]
    fn invalid_ignore_glob_is_rejected() {
        let cfg = EffectiveConfig {
            ignores: vec![IgnorePolicy {
                rule: "aws-[".to_string(),
                ..IgnorePolicy::default()
            }],
            ..EffectiveConfig::default()
        };
        let err = scan(&registry(), &State::default(), &cfg).unwrap_err();
        assert!(matches!(err, ScanError::InvalidIgnorePattern { .. }));
    }

    #[test]
    fn default_config_runs_every_rule() {
        let report = scan(&registry(), &State::default(), &EffectiveConfig::default())
            .expect("scan");
        assert_eq!(report.rules_evaluated, 9);
        assert_eq!(report.counts.passed, 9);
        assert!(!report.has_failures());
        assert!(report.not_run.is_empty());
    }

    #[test]
    fn ignores_turn_failures_into_ignored_results() {
        let state = state_with_buckets(vec![
            with_versioning(bucket("a", 1), Some(false)),
            with_versioning(bucket("b", 20), Some(false)),
        ]);
        let mut cfg = only(ids::RULE_AWS_S3_ENABLE_VERSIONING);
        cfg.ignores.push(IgnorePolicy {
            rule: "aws-s3-*".to_string(),
            path: Some("*.tf".to_string()),
            reference: Some("aws_s3_bucket.b".to_string()),
        });

        let report = scan(&registry(), &state, &cfg).expect("scan");
        assert_eq!(report.rules_evaluated, 1);
        assert_eq!(report.counts.failed, 1);
        assert_eq!(report.counts.ignored, 1);
        assert_eq!(report.failed_by_severity.medium, 1);
        let ignored: Vec<_> = report.results.with_status(Status::Ignored).collect();
        assert_eq!(
            ignored[0].location().map(|m| m.root().reference()),
            Some("aws_s3_bucket.b")
        );
    }

    #[test]
    fn cancelled_scan_reports_unrun_rules() {
        let cancel = Cancellation::new();
        cancel.cancel();
        let report = scan_with(
            &registry(),
            &State::default(),
            &EffectiveConfig::default(),
            Some(&cancel),
        )
        .expect("scan");
        assert!(report.results.is_empty());
        assert_eq!(report.not_run.len(), 9);
        assert_eq!(report.rules_evaluated, 0);
    }
}
