use crate::finding::Findings;
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{access_blocks, block_label, locate_block_flag};
use infraguard_state::{State, TriState};
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_S3,
    short_code: ids::CODE_NO_PUBLIC_BUCKETS,
    summary: "S3 access block should restrict public bucket to limit access",
    impact: "Public buckets can be accessed by anyone",
    resolution: "Limit the access to public buckets to only the owner or AWS services",
    explanation: "Restricting public buckets limits access to a bucket with a public policy to \
                  AWS service principals and authorized users within the bucket owner's account.",
    links: &[
        "https://docs.aws.amazon.com/AmazonS3/latest/userguide/access-control-block-public-access.html",
    ],
    severity: Severity::High,
};

/// Fails on an explicit `false` for `restrict_public_buckets`. Unset passes.
pub struct NoPublicBuckets;

impl Check for NoPublicBuckets {
    fn evaluate(&self, state: &State) -> Findings {
        let mut out = Findings::new();
        for (block, owner) in access_blocks(state) {
            let flag = &block.restrict_public_buckets;
            if let TriState::False = flag.state() {
                out.add(
                    format!(
                        "Public access block '{}' does not restrict public buckets",
                        block_label(block, owner)
                    ),
                    locate_block_flag(flag, block, owner),
                );
            }
        }
        out
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, NoPublicBuckets)
}
