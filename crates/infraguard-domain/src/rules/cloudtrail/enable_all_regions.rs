use crate::finding::Findings;
use crate::rule::{Check, Rule, RuleDefinition};
use crate::rules::utils::{label, locate};
use infraguard_state::{State, TriState};
use infraguard_types::{Provider, Severity, ids};

pub const DEFINITION: RuleDefinition = RuleDefinition {
    provider: Provider::Aws,
    service: ids::SERVICE_CLOUDTRAIL,
    short_code: ids::CODE_ENABLE_ALL_REGIONS,
    summary: "Cloudtrail should be enabled in all regions regardless of where your AWS resources are generally homed",
    impact: "Activity could be happening in your account in a different region",
    resolution: "Enable Cloudtrail in all regions",
    explanation: "When creating Cloudtrail in the AWS Management Console the trail is configured \
                  by default to be multi-region; this is not the case with declarative \
                  infrastructure.",
    links: &[
        "https://docs.aws.amazon.com/awscloudtrail/latest/userguide/receive-cloudtrail-log-files-from-multiple-regions.html",
    ],
    severity: Severity::Medium,
};

/// Multi-region must be explicitly on; an unset flag fails at the trail.
pub struct EnableAllRegions;

impl Check for EnableAllRegions {
    fn evaluate(&self, state: &State) -> Findings {
        let mut out = Findings::new();
        for trail in &state.aws.cloudtrail.trails {
            let multi_region = &trail.is_multi_region;
            if matches!(multi_region.state(), TriState::False | TriState::Unset) {
                out.add(
                    format!(
                        "Trail '{}' is not enabled across all regions",
                        label(&trail.metadata, &trail.name)
                    ),
                    locate(multi_region, &[trail]),
                );
            }
        }
        out
    }
}

pub fn rule() -> Rule {
    Rule::new(DEFINITION, EnableAllRegions)
}
