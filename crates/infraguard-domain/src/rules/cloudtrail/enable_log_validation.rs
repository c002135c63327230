use crate::finding::{Finding, Findings};
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{label, locate};
use infraguard_state::State;
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_CLOUDTRAIL,
    short_code: ids::CODE_ENABLE_LOG_VALIDATION,
    summary: "Cloudtrail log validation should be enabled to prevent tampering of log data",
    impact: "Illicit activity could be removed from the logs",
    resolution: "Turn on log validation for Cloudtrail",
    explanation: "Log validation produces a digest file for each log file delivered, so any \
                  modification or deletion after delivery can be detected.",
    links: &[
        "https://docs.aws.amazon.com/awscloudtrail/latest/userguide/cloudtrail-log-file-validation-intro.html",
    ],
    severity: Severity::High,
};

/// Log file validation must be explicitly enabled.
pub struct EnableLogValidation;

impl Check for EnableLogValidation {
    fn evaluate(&self, state: &State) -> Findings {
        state
            .aws
            .cloudtrail
            .trails
            .iter()
            .filter(|trail| !trail.enable_log_file_validation.is_explicitly_true())
            .map(|trail| {
                Finding::new(
                    format!(
                        "Trail '{}' does not have log validation enabled",
                        label(&trail.metadata, &trail.name)
                    ),
                    locate(&trail.enable_log_file_validation, &[trail]),
                )
            })
            .collect()
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, EnableLogValidation)
}
