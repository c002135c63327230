use crate::finding::Findings;
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{label, locate};
use infraguard_state::State;
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_S3,
    short_code: ids::CODE_ENABLE_BUCKET_ENCRYPTION,
    summary: "Unencrypted S3 bucket",
    impact: "The bucket objects could be read if compromised",
    resolution: "Configure bucket encryption",
    explanation: "Buckets should have encryption at rest configured so stored objects are \
                  unreadable without access to the key.",
    links: &[
        "https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucket-encryption.html",
    ],
    severity: Severity::High,
};

/// Encryption must be explicitly enabled.
pub struct EnableBucketEncryption;

impl Check for EnableBucketEncryption {
    fn evaluate(&self, state: &State) -> Findings {
        let mut out = Findings::new();
        for bucket in &state.aws.s3.buckets {
            let enabled = &bucket.encryption.enabled;
            if enabled.is_explicitly_true() {
                continue;
            }
            out.add(
                format!(
                    "Bucket '{}' does not have encryption enabled",
                    label(&bucket.metadata, &bucket.name)
                ),
                locate(enabled, &[&bucket.encryption, bucket]),
            );
        }
        out
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, EnableBucketEncryption)
}
