use crate::finding::Findings;
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{label, locate};
use infraguard_state::{State, TriState};
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_S3,
    short_code: ids::CODE_ENABLE_VERSIONING,
    summary: "S3 data should be versioned",
    impact: "Deleted or modified data would not be recoverable",
    resolution: "Enable versioning to protect against accidental or malicious removal or modification",
    explanation: "Versioning keeps multiple variants of an object in the same bucket, so every \
                  version of every object can be preserved, retrieved, and restored. It makes \
                  recovery from both unintended user actions and application failures easier.",
    links: &["https://docs.aws.amazon.com/AmazonS3/latest/userguide/Versioning.html"],
    severity: Severity::Medium,
};

/// Versioning must be explicitly enabled; leaving it unset counts as disabled.
pub struct EnableVersioning;

impl Check for EnableVersioning {
    fn evaluate(&self, state: &State) -> Findings {
        let mut out = Findings::new();
        for bucket in &state.aws.s3.buckets {
            let enabled = &bucket.versioning.enabled;
            match enabled.state() {
                TriState::True => continue,
                TriState::False | TriState::Unset => {}
            }
            out.add(
                format!(
                    "Resource '{}' does not have versioning enabled",
                    label(&bucket.metadata, &bucket.name)
                ),
                locate(enabled, &[&bucket.versioning, bucket]),
            );
        }
        out
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, EnableVersioning)
}
