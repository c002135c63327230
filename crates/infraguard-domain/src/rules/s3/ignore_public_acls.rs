use crate::finding::Findings;
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{access_blocks, block_label, locate_block_flag};
use infraguard_state::{State, TriState};
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_S3,
    short_code: ids::CODE_IGNORE_PUBLIC_ACLS,
    summary: "S3 access block should ignore public ACLs",
    impact: "PUT calls with public ACLs specified can make objects public",
    resolution: "Enable ignoring the application of public ACLs in PUT calls",
    explanation: "Buckets should ignore public ACLs on the bucket and on any objects it contains. \
                  Unlike blocking, PUT calls carrying a public ACL still succeed but the ACL is \
                  not applied.",
    links: &[
        "https://docs.aws.amazon.com/AmazonS3/latest/userguide/access-control-block-public-access.html",
    ],
    severity: Severity::High,
};

/// Only an explicit `false` fails. An unset flag takes the provider default and passes.
pub struct IgnorePublicAcls;

impl Check for IgnorePublicAcls {
    fn evaluate(&self, state: &State) -> Findings {
        let mut out = Findings::new();
        for (block, owner) in access_blocks(state) {
            let flag = &block.ignore_public_acls;
            if flag.state() != TriState::False {
                continue;
            }
            out.add(
                format!(
                    "Public access block '{}' does not ignore public ACLs",
                    block_label(block, owner)
                ),
                locate_block_flag(flag, block, owner),
            );
        }
        out
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, IgnorePublicAcls)
}
