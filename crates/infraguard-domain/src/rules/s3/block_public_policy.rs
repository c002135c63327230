use crate::finding::{Finding, Findings};
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{access_blocks, block_label, locate_block_flag};
use infraguard_state::{State, TriState};
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_S3,
    short_code: ids::CODE_BLOCK_PUBLIC_POLICY,
    summary: "S3 access block should block public policy",
    impact: "Users could put a policy that allows public access",
    resolution: "Prevent policies that allow public access being PUT",
    explanation: "Blocking public policy rejects bucket policies that grant public access, \
                  without changing existing ones.",
    links: &[
        "https://docs.aws.amazon.com/AmazonS3/latest/userguide/access-control-block-public-access.html",
    ],
    severity: Severity::High,
};

/// Only an explicit `false` fails; unset passes.
pub struct BlockPublicPolicy;

impl Check for BlockPublicPolicy {
    fn evaluate(&self, state: &State) -> Findings {
        access_blocks(state)
            .filter(|(block, _)| block.block_public_policy.state() == TriState::False)
            .map(|(block, owner)| {
                Finding::new(
                    format!(
                        "Public access block '{}' does not block public policies",
                        block_label(block, owner)
                    ),
                    locate_block_flag(&block.block_public_policy, block, owner),
                )
            })
            .collect()
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, BlockPublicPolicy)
}
