use crate::registry::RuleFilter;
use infraguard_types::Severity;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulePolicy {
    /// `Some(true)` forces the rule on regardless of `min_severity`; `Some(false)` turns it off.
    /// `None` leaves selection to the profile.
    pub enabled: Option<bool>,
}

/// An accepted-risk entry. Failed results matching every present field are reported as ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnorePolicy {
    /// Glob over rule long ids.
    pub rule: String,
    /// Glob over the flagged value's source filename.
    pub path: Option<String>,
    /// Exact logical reference of the flagged value or any of its parents.
    pub reference: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub min_severity: Severity,
    pub parallel: bool,
    /// Per-rule overrides keyed by long id. Every configured id is present, even without overrides.
    pub rules: BTreeMap<String, RulePolicy>,
    pub ignores: Vec<IgnorePolicy>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            min_severity: Severity::Low,
            parallel: true,
            rules: BTreeMap::new(),
            ignores: Vec::new(),
        }
    }
}

impl EffectiveConfig {
    /// Rule selection implied by this config.
    pub fn rule_filter(&self) -> RuleFilter {
        let mut filter = RuleFilter {
            min_severity: Some(self.min_severity),
            ..RuleFilter::default()
        };
        for (id, policy) in &self.rules {
            match policy.enabled {
                Some(true) => {
                    filter.enabled.insert(id.clone());
                }
                Some(false) => {
                    filter.disabled.insert(id.clone());
                }
                None => {}
            }
        }
        filter
    }
}
