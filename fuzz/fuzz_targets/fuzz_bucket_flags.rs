//! Structured fuzz target for the tri-state bucket rules.
//!
//! Builds buckets from arbitrary flag combinations and checks the results fold: a rule yields one
//! pass when nothing is flagged, otherwise exactly one failure per offending bucket.

#![no_main]

use arbitrary::Arbitrary;
use infraguard_domain::{Registry, evaluate};
use infraguard_state::aws::s3::Bucket;
use infraguard_state::{BoolValue, Managed, Metadata, State, TriState};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Flag {
    True,
    False,
    Unset,
}

impl Flag {
    fn value(self) -> BoolValue {
        match self {
            Flag::True => Managed::explicit(true, Metadata::test()),
            Flag::False => Managed::explicit(false, Metadata::test()),
            Flag::Unset => BoolValue::default(),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    buckets: Vec<(Flag, Flag, Flag)>,
}

fuzz_target!(|input: Input| {
    let Ok(registry) = Registry::builtin() else {
        return;
    };

    let mut state = State::default();
    state.aws.s3.buckets = input
        .buckets
        .iter()
        .take(64)
        .map(|(versioning, encryption, logging)| {
            let mut bucket = Bucket::default();
            bucket.versioning.enabled = versioning.value();
            bucket.encryption.enabled = encryption.value();
            bucket.logging.enabled = logging.value();
            bucket
        })
        .collect();

    let results = evaluate(registry.all(), &state);
    for (id, pick) in [
        ("aws-s3-enable-versioning", 0usize),
        ("aws-s3-enable-bucket-encryption", 1),
        ("aws-s3-enable-bucket-logging", 2),
    ] {
        let offenders = state
            .aws
            .s3
            .buckets
            .iter()
            .filter(|b| {
                let flag = match pick {
                    0 => &b.versioning.enabled,
                    1 => &b.encryption.enabled,
                    _ => &b.logging.enabled,
                };
                flag.state() != TriState::True
            })
            .count();
        let for_rule = results.for_rule(id).count();
        let failed = results.for_rule(id).filter(|r| r.location().is_some()).count();
        if offenders == 0 {
            assert_eq!(for_rule, 1);
        } else {
            assert_eq!(failed, offenders);
            assert_eq!(for_rule, offenders);
        }
    }
});
