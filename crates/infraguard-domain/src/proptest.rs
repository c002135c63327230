//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Evaluation determinism and parallel/sequential equivalence
//! - The findings → results fold (one pass per clean rule, one failure per finding)
//! - Fault isolation and duplicate registration

use crate::engine::{EvalOptions, evaluate, evaluate_with};
use crate::finding::Findings;
use crate::registry::{Registry, RegistryError};
use crate::rule::Rule;
use crate::rules;
use crate::test_support::{
    access_block, bucket, definition, state_with_buckets, trail, with_versioning,
};
use infraguard_state::State;
use infraguard_types::{Status, ids};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Explicit true, explicit false, or unset.
fn arb_flag() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
}

fn arb_versioning_flags() -> impl Strategy<Value = Vec<Option<bool>>> {
    prop::collection::vec(arb_flag(), 0..12)
}

/// Buckets spaced 20 lines apart so nested attributes never collide.
fn versioned_state(flags: &[Option<bool>]) -> State {
    state_with_buckets(
        flags
            .iter()
            .enumerate()
            .map(|(i, flag)| with_versioning(bucket(&format!("b{i}"), i as u32 * 20 + 1), *flag))
            .collect(),
    )
}

fn arb_state() -> impl Strategy<Value = State> {
    (
        arb_versioning_flags(),
        prop::collection::vec((arb_flag(), arb_flag(), arb_flag(), arb_flag()), 0..6),
        prop::collection::vec((arb_flag(), arb_flag()), 0..6),
    )
        .prop_map(|(versioning, blocks, trails)| {
            let mut state = versioned_state(&versioning);
            state.aws.s3.public_access_blocks = blocks
                .into_iter()
                .enumerate()
                .map(|(i, (a, p, ig, r))| {
                    let reference = format!("aws_s3_bucket_public_access_block.p{i}");
                    access_block(1000 + i as u32 * 10, &reference, a, p, ig, r)
                })
                .collect();
            state.aws.cloudtrail.trails = trails
                .into_iter()
                .enumerate()
                .map(|(i, (m, v))| trail(&format!("t{i}"), 2000 + i as u32 * 10, m, v))
                .collect();
            state
        })
}

fn builtin_registry() -> Registry {
    Registry::builtin().expect("builtin registry")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(state in arb_state()) {
        let registry = builtin_registry();
        let first = evaluate(registry.all(), &state);
        let second = evaluate(registry.all(), &state);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn parallel_equals_sequential(state in arb_state()) {
        let registry = builtin_registry();
        let sequential = evaluate(registry.all(), &state);
        let parallel = evaluate_with(
            registry.all(),
            &state,
            EvalOptions { parallel: true, ..EvalOptions::default() },
        );
        prop_assert_eq!(sequential, parallel.results);
    }

    #[test]
    fn every_rule_reports_at_least_once(state in arb_state()) {
        let registry = builtin_registry();
        let results = evaluate(registry.all(), &state);
        for rule in registry.all() {
            let id = rule.long_id();
            let for_rule: Vec<_> = results.for_rule(&id).collect();
            prop_assert!(!for_rule.is_empty());
            let passed = for_rule.iter().filter(|r| r.status() == Status::Passed).count();
            // A pass is only ever the single result of its rule.
            prop_assert!(passed == 0 || for_rule.len() == 1);
        }
    }

    #[test]
    fn versioning_fails_once_per_offender_at_its_line(flags in arb_versioning_flags()) {
        let state = versioned_state(&flags);
        let results = evaluate(&[rules::builtin().swap_remove(0)], &state);

        let expected: Vec<u32> = flags
            .iter()
            .enumerate()
            .filter(|(_, f)| **f != Some(true))
            .map(|(i, f)| {
                let base = i as u32 * 20 + 1;
                // Explicit flags sit one line under their block, unset ones report the block.
                if f.is_some() { base + 3 } else { base + 2 }
            })
            .collect();

        if expected.is_empty() {
            prop_assert_eq!(results.len(), 1);
            prop_assert_eq!(results.as_slice()[0].status(), Status::Passed);
        } else {
            let lines: Vec<u32> = results
                .failed()
                .filter_map(|r| r.range().map(|x| x.start_line))
                .collect();
            prop_assert_eq!(results.counts().passed, 0);
            prop_assert_eq!(lines, expected);
        }
    }

    #[test]
    fn faulting_rules_never_hide_others(panics in prop::collection::vec(any::<bool>(), 1..8)) {
        const CODES: [&str; 8] = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7"];
        let rules: Vec<Rule> = panics
            .iter()
            .zip(CODES)
            .map(|(&explode, code)| {
                Rule::new(definition("s3", code), move |_: &State| {
                    if explode {
                        panic!("rule {code} exploded");
                    }
                    Findings::new()
                })
            })
            .collect();

        let results = evaluate(&rules, &State::default());
        prop_assert_eq!(results.len(), panics.len());
        let faults = results.iter().filter(|r| r.is_fault()).count();
        prop_assert_eq!(faults, panics.iter().filter(|p| **p).count());
        prop_assert_eq!(results.counts().passed as usize, panics.len() - faults);
    }

    #[test]
    fn reregistering_any_builtin_is_rejected(index in 0usize..9) {
        let mut registry = builtin_registry();
        let again = rules::builtin().swap_remove(index);
        let id = again.long_id();
        prop_assert_eq!(
            registry.register(again),
            Err(RegistryError::Duplicate { id })
        );
        prop_assert_eq!(registry.len(), 9);
    }
}

#[test]
fn public_acl_scenario_rule_is_registered_under_its_long_id() {
    let registry = builtin_registry();
    let rule = registry
        .get(ids::RULE_AWS_S3_IGNORE_PUBLIC_ACLS)
        .expect("ignore-public-acls");
    assert_eq!(rule.definition().short_code, ids::CODE_IGNORE_PUBLIC_ACLS);
}
