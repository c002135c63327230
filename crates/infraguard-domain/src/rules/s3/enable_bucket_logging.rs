use crate::finding::Findings;
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{label, locate};
use infraguard_state::State;
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_S3,
    short_code: ids::CODE_ENABLE_BUCKET_LOGGING,
    summary: "S3 bucket does not have logging enabled",
    impact: "There is no way to determine the access to this bucket",
    resolution: "Add a logging block to the resource to enable access logging",
    explanation: "Access logging records each request made to the bucket, which is needed for \
                  security audits and incident response.",
    links: &[
        "https://docs.aws.amazon.com/AmazonS3/latest/userguide/ServerLogs.html",
    ],
    severity: Severity::Medium,
};

/// Access logging must be explicitly enabled; unset counts as disabled.
pub struct EnableBucketLogging;

impl Check for EnableBucketLogging {
    fn evaluate(&self, state: &State) -> Findings {
        let mut out = Findings::new();
        for bucket in &state.aws.s3.buckets {
            let enabled = &bucket.logging.enabled;
            if !enabled.is_explicitly_true() {
                out.add(
                    format!(
                        "Bucket '{}' does not have logging enabled",
                        label(&bucket.metadata, &bucket.name)
                    ),
                    locate(enabled, &[&bucket.logging, bucket]),
                );
            }
        }
        out
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, EnableBucketLogging)
}
