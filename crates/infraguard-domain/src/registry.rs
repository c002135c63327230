//! Rule registry.
//!
//! Registration takes `&mut Registry` and evaluation borrows `&Registry`, so the registry cannot
//! change while a scan is running. There is no global instance: startup code builds one (usually
//! via [`Registry::builtin`]) and passes it down, and tests build their own.

use crate::rule::{Rule, RuleDefinition};
use infraguard_types::{Provider, Severity};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("rule {id} is already registered")]
    Duplicate { id: String },

    #[error("rule {id} has invalid metadata: {reason}")]
    InvalidMetadata { id: String, reason: String },

    #[error("no rule registered with id {id}")]
    NotFound { id: String },
}

#[derive(Debug, Default)]
pub struct Registry {
    rules: Vec<Rule>,
    by_long_id: BTreeMap<String, usize>,
    identities: BTreeSet<(Provider, &'static str, &'static str)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every builtin rule.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        crate::rules::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Add a rule. Duplicates are rejected, never overwritten.
    pub fn register(&mut self, rule: Rule) -> Result<(), RegistryError> {
        let def = *rule.definition();
        let id = def.long_id();

        def.validate()
            .map_err(|reason| RegistryError::InvalidMetadata {
                id: id.clone(),
                reason,
            })?;

        let identity = (def.provider, def.service, def.short_code);
        // Distinct triples can still collide on the long id ("a-b" + "c" vs "a" + "b-c").
        if self.identities.contains(&identity) || self.by_long_id.contains_key(&id) {
            return Err(RegistryError::Duplicate { id });
        }

        debug!(rule = %id, severity = %def.severity, "registered rule");
        self.identities.insert(identity);
        self.by_long_id.insert(id, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Every rule, in registration order.
    pub fn all(&self) -> &[Rule] {
        &self.rules
    }

    pub fn by_id(&self, id: &str) -> Option<&Rule> {
        self.by_long_id.get(id).map(|&i| &self.rules[i])
    }

    pub fn get(&self, id: &str) -> Result<&Rule, RegistryError> {
        self.by_id(id).ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_long_id.contains_key(id)
    }

    /// Long ids in registration order.
    pub fn ids(&self) -> Vec<String> {
        self.rules.iter().map(Rule::long_id).collect()
    }

    /// Rules matching `filter`, in registration order.
    pub fn select(&self, filter: &RuleFilter) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|r| filter.matches(r.definition()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Rule selection criteria. Empty criteria select everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleFilter {
    pub provider: Option<Provider>,
    pub service: Option<String>,
    pub min_severity: Option<Severity>,
    /// Long ids selected even when below `min_severity`.
    pub enabled: BTreeSet<String>,
    /// Long ids never selected.
    pub disabled: BTreeSet<String>,
}

impl RuleFilter {
    pub fn provider(provider: Provider) -> Self {
        Self {
            provider: Some(provider),
            ..Self::default()
        }
    }

    pub fn service(provider: Provider, service: &str) -> Self {
        Self {
            provider: Some(provider),
            service: Some(service.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, def: &RuleDefinition) -> bool {
        if self.provider.is_some_and(|p| p != def.provider) {
            return false;
        }
        if self.service.as_deref().is_some_and(|s| s != def.service) {
            return false;
        }
        let id = def.long_id();
        if self.disabled.contains(&id) {
            return false;
        }
        if self.enabled.contains(&id) {
            return true;
        }
        self.min_severity.is_none_or(|min| def.severity >= min)
    }
}
