//! The rule authoring contract.
//!
//! A rule is declarative metadata plus one [`Check`]. New checks plug in by registering a
//! [`Rule`]; the engine never needs to know what a check looks at.

use crate::finding::Findings;
use infraguard_state::State;
use infraguard_types::{Provider, Severity};

/// Identity and documentation of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleDefinition {
    pub provider: Provider,
    pub service: &'static str,
    pub short_code: &'static str,
    /// One-line statement of the invariant.
    pub summary: &'static str,
    /// What goes wrong when the invariant does not hold.
    pub impact: &'static str,
    pub resolution: &'static str,
    pub explanation: &'static str,
    pub links: &'static [&'static str],
    pub severity: Severity,
}

impl RuleDefinition {
    /// Stable long identifier: `{provider}-{service}-{short_code}`.
    pub fn long_id(&self) -> String {
        format!("{}-{}-{}", self.provider, self.service, self.short_code)
    }

    /// Check the metadata is well-formed enough to register.
    pub fn validate(&self) -> Result<(), String> {
        if !is_kebab_token(self.service) {
            return Err(format!(
                "service must be a lowercase kebab-case token, got '{}'",
                self.service
            ));
        }
        if !is_kebab_token(self.short_code) {
            return Err(format!(
                "short code must be a lowercase kebab-case token, got '{}'",
                self.short_code
            ));
        }
        for (field, value) in [
            ("summary", self.summary),
            ("impact", self.impact),
            ("resolution", self.resolution),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} must not be empty"));
            }
        }
        if let Some(link) = self.links.iter().find(|l| !l.starts_with("https://")) {
            return Err(format!("link must be an https URL, got '{link}'"));
        }
        Ok(())
    }
}

fn is_kebab_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    !s.ends_with('-')
        && !s.contains("--")
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// The predicate half of a rule.
///
/// Implementations must be pure functions of the state: the same state always yields the same
/// findings, and nothing outside the state is read or written. That is what lets the engine run
/// rules in parallel and in any order.
pub trait Check: Send + Sync {
    fn evaluate(&self, state: &State) -> Findings;
}

impl<F> Check for F
where
    F: Fn(&State) -> Findings + Send + Sync,
{
    fn evaluate(&self, state: &State) -> Findings {
        self(state)
    }
}

/// A registered rule: definition plus check.
pub struct Rule {
    definition: RuleDefinition,
    check: Box<dyn Check>,
}

impl Rule {
    pub fn new(definition: RuleDefinition, check: impl Check + 'static) -> Self {
        Self {
            definition,
            check: Box::new(check),
        }
    }

    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    pub fn long_id(&self) -> String {
        self.definition.long_id()
    }

    pub fn evaluate(&self, state: &State) -> Findings {
        self.check.evaluate(state)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.long_id())
            .field("severity", &self.definition.severity)
            .finish_non_exhaustive()
    }
}
