//! Pure rule evaluation (no IO).
//!
//! Input: a [`State`](infraguard_state::State) built elsewhere and a set of registered rules.
//! Output: one or more results per rule, each attributed to the exact value that failed.

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod finding;
pub mod fingerprint;
pub mod policy;
pub mod registry;
pub mod report;
pub mod result;
pub mod rule;
pub mod rules;
pub mod suppress;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{Cancellation, EvalOptions, Evaluation, evaluate, evaluate_with};
pub use error::ScanError;
pub use finding::{Finding, Findings};
pub use registry::{Registry, RegistryError, RuleFilter};
pub use report::{DomainReport, scan, scan_with};
pub use result::{Outcome, Results, ScanResult, StatusCounts, classify};
pub use rule::{Check, Rule, RuleDefinition};
pub use suppress::{IgnoreList, Suppressor};
