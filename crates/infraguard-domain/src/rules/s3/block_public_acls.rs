use crate::finding::Findings;
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{access_blocks, block_label, locate_block_flag};
use infraguard_state::{State, TriState};
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_S3,
    short_code: ids::CODE_BLOCK_PUBLIC_ACLS,
    summary: "S3 access block should block public ACLs",
    impact: "PUT calls with public ACLs specified can make objects public",
    resolution: "Enable blocking any PUT calls with a public ACL specified",
    explanation: "Blocking public ACLs rejects any PUT request that would attach a public ACL to \
                  the bucket or one of its objects.",
    links: &[
        "https://docs.aws.amazon.com/AmazonS3/latest/userguide/access-control-block-public-access.html",
    ],
    severity: Severity::High,
};

/// Only an explicit `false` fails. Unset takes the provider default and passes.
pub struct BlockPublicAcls;

impl Check for BlockPublicAcls {
    fn evaluate(&self, state: &State) -> Findings {
        let mut out = Findings::new();
        for (block, owner) in access_blocks(state) {
            let flag = &block.block_public_acls;
            if flag.state() == TriState::False {
                out.add(
                    format!(
                        "Public access block '{}' does not block public ACLs",
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
    Rule::new(DEFINITION, BlockPublicAcls)
}
