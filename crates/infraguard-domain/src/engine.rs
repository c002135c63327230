//! Evaluation engine: runs rules against a state and folds their findings into results.
//!
//! Each rule runs in isolation. A check that panics yields one faulted `Failed` result for that
//! rule and evaluation continues with the next. Rules only read the state, so they may run on a
//! worker pool; output order is the input rule order either way.

use crate::result::{Outcome, Results, ScanResult, classify};
use crate::rule::Rule;
use crate::suppress::Suppressor;
use infraguard_state::State;
use rayon::prelude::*;
use std::any::Any;
use std::borrow::Borrow;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

/// Cooperative cancellation flag, checked between rules.
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Default)]
pub struct EvalOptions<'a> {
    pub parallel: bool,
    pub cancel: Option<&'a Cancellation>,
    pub suppressor: Option<&'a dyn Suppressor>,
}

#[derive(Clone, Debug, Default)]
pub struct Evaluation {
    pub results: Results,
    /// Long ids of rules skipped because evaluation was cancelled, in input order.
    pub not_run: Vec<String>,
}

impl Evaluation {
    pub fn is_complete(&self) -> bool {
        self.not_run.is_empty()
    }
}

/// Evaluate every rule sequentially with no suppression.
pub fn evaluate<R>(rules: &[R], state: &State) -> Results
where
    R: Borrow<Rule> + Sync,
{
    evaluate_with(rules, state, EvalOptions::default()).results
}

pub fn evaluate_with<R>(rules: &[R], state: &State, opts: EvalOptions<'_>) -> Evaluation
where
    R: Borrow<Rule> + Sync,
{
    info!(
        rules = rules.len(),
        resources = state.resource_count(),
        parallel = opts.parallel,
        "evaluating rules"
    );

    let run = |rule: &R| -> (String, Option<Vec<ScanResult>>) {
        let rule = rule.borrow();
        let id = rule.long_id();
        if opts.cancel.is_some_and(Cancellation::is_cancelled) {
            return (id, None);
        }
        let results = run_one(rule, state, opts.suppressor);
        (id, Some(results))
    };

    let outcomes: Vec<(String, Option<Vec<ScanResult>>)> = if opts.parallel {
        rules.par_iter().map(run).collect()
    } else {
        rules.iter().map(run).collect()
    };

    let mut evaluation = Evaluation::default();
    for (id, results) in outcomes {
        match results {
            Some(results) => evaluation.results.extend(results),
            None => evaluation.not_run.push(id),
        }
    }

    if !evaluation.not_run.is_empty() {
        info!(skipped = evaluation.not_run.len(), "evaluation cancelled");
    }
    evaluation
}

fn run_one(rule: &Rule, state: &State, suppressor: Option<&dyn Suppressor>) -> Vec<ScanResult> {
    let def = rule.definition();
    let outcome = match catch_unwind(AssertUnwindSafe(|| rule.evaluate(state))) {
        Ok(findings) => {
            debug!(rule = %def.long_id(), findings = findings.len(), "rule evaluated");
            Outcome::Findings(findings)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(rule = %def.long_id(), fault = %message, "rule faulted");
            Outcome::Fault(message)
        }
    };
    classify(def, outcome, suppressor)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Findings;
    use crate::test_support::{definition, meta};
    use infraguard_types::Status;

    fn clean(code: &'static str) -> Rule {
        Rule::new(definition("s3", code), |_: &State| Findings::new())
    }

    fn failing(code: &'static str, lines: &'static [u32]) -> Rule {
        Rule::new(definition("s3", code), move |_: &State| {
            lines
                .iter()
                .map(|l| crate::finding::Finding::new("bad", &meta(*l, "aws_s3_bucket.a")))
                .collect()
        })
    }

    fn panicking(code: &'static str) -> Rule {
        Rule::new(definition("s3", code), |_: &State| -> Findings {
            panic!("check exploded")
        })
    }

    #[test]
    fn empty_rule_set_yields_no_results() {
        let rules: Vec<Rule> = Vec::new();
        assert!(evaluate(&rules, &State::default()).is_empty());
    }

    #[test]
    fn results_follow_rule_order() {
        let rules = vec![failing("b-rule", &[4, 1]), clean("a-rule")];
        let results = evaluate(&rules, &State::default());
        let summary: Vec<(String, Status)> =
            results.iter().map(|r| (r.rule_id(), r.status())).collect();
        assert_eq!(
            summary,
            vec![
                ("aws-s3-b-rule".to_string(), Status::Failed),
                ("aws-s3-b-rule".to_string(), Status::Failed),
                ("aws-s3-a-rule".to_string(), Status::Passed),
            ]
        );
    }

    #[test]
    fn panicking_rule_is_isolated() {
        let rules = vec![clean("first"), panicking("second"), failing("third", &[2])];
        let results = evaluate(&rules, &State::default());

        assert_eq!(results.len(), 3);
        let faulted: Vec<_> = results.iter().filter(|r| r.is_fault()).collect();
        assert_eq!(faulted.len(), 1);
        assert_eq!(faulted[0].rule_id(), "aws-s3-second");
        assert_eq!(faulted[0].status(), Status::Failed);
        assert!(faulted[0].description().contains("check exploded"));
        assert_eq!(results.for_rule("aws-s3-third").count(), 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let rules: Vec<Rule> = vec![
            failing("one", &[1, 2, 3]),
            clean("two"),
            panicking("three"),
            failing("four", &[8]),
            clean("five"),
        ];
        let state = State::default();
        let sequential = evaluate(&rules, &state);
        let parallel = evaluate_with(
            &rules,
            &state,
            EvalOptions {
                parallel: true,
                ..EvalOptions::default()
            },
        );
        assert_eq!(sequential, parallel.results);
    }

    #[test]
    fn borrowed_rule_slices_are_accepted() {
        let owned = vec![clean("a"), clean("b")];
        let borrowed: Vec<&Rule> = owned.iter().collect();
        assert_eq!(evaluate(&borrowed, &State::default()).len(), 2);
    }

    #[test]
    fn cancelled_before_start_runs_nothing() {
        let rules = vec![clean("a"), clean("b")];
        let cancel = Cancellation::new();
        cancel.cancel();
        let evaluation = evaluate_with(
            &rules,
            &State::default(),
            EvalOptions {
                cancel: Some(&cancel),
                ..EvalOptions::default()
            },
        );
        assert!(evaluation.results.is_empty());
        assert_eq!(evaluation.not_run, vec!["aws-s3-a", "aws-s3-b"]);
        assert!(!evaluation.is_complete());
    }

    #[test]
    fn cancellation_between_rules_keeps_earlier_results() {
        let cancel = Cancellation::new();
        let trigger = cancel.clone();
        let rules = vec![
            Rule::new(definition("s3", "first"), move |_: &State| {
                trigger.cancel();
                Findings::new()
            }),
            clean("second"),
        ];
        let evaluation = evaluate_with(
            &rules,
            &State::default(),
            EvalOptions {
                cancel: Some(&cancel),
                ..EvalOptions::default()
            },
        );
        assert_eq!(evaluation.results.len(), 1);
        assert_eq!(evaluation.not_run, vec!["aws-s3-second"]);
    }

    #[test]
    fn panic_message_handles_payload_kinds() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
