//! Accepted-risk suppression: turns matching would-be failures into ignored results.

use crate::error::ScanError;
use crate::finding::Finding;
use crate::policy::IgnorePolicy;
use crate::rule::RuleDefinition;
use globset::{Glob, GlobMatcher};

/// Decides whether a finding has been accepted and should be reported as ignored.
pub trait Suppressor: Send + Sync {
    fn suppresses(&self, rule: &RuleDefinition, finding: &Finding) -> bool;
}

#[derive(Clone, Debug)]
struct IgnoreEntry {
    rule: GlobMatcher,
    path: Option<GlobMatcher>,
    reference: Option<String>,
}

impl IgnoreEntry {
    fn matches(&self, rule_id: &str, finding: &Finding) -> bool {
        if !self.rule.is_match(rule_id) {
            return false;
        }
        if let Some(path) = &self.path
            && !path.is_match(finding.location.range().filename.as_str())
        {
            return false;
        }
        if let Some(reference) = &self.reference {
            return finding
                .location
                .breadcrumbs()
                .iter()
                .any(|m| m.reference() == reference);
        }
        true
    }
}

/// Ignore entries compiled from configuration.
#[derive(Clone, Debug, Default)]
pub struct IgnoreList {
    entries: Vec<IgnoreEntry>,
}

impl IgnoreList {
    pub fn compile(policies: &[IgnorePolicy]) -> Result<Self, ScanError> {
        let entries = policies
            .iter()
            .map(|p| {
                Ok(IgnoreEntry {
                    rule: compile_glob(&p.rule)?,
                    path: p.path.as_deref().map(compile_glob).transpose()?,
                    reference: p.reference.clone(),
                })
            })
            .collect::<Result<Vec<_>, ScanError>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, ScanError> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|source| ScanError::InvalidIgnorePattern {
            pattern: pattern.to_string(),
            source,
        })
}

impl Suppressor for IgnoreList {
    fn suppresses(&self, rule: &RuleDefinition, finding: &Finding) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let rule_id = rule.long_id();
        self.entries.iter().any(|e| e.matches(&rule_id, finding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{definition, meta};
    use infraguard_state::Metadata;
    use infraguard_types::Range;

    fn policy(rule: &str, path: Option<&str>, reference: Option<&str>) -> IgnorePolicy {
        IgnorePolicy {
            rule: rule.to_string(),
            path: path.map(str::to_string),
            reference: reference.map(str::to_string),
        }
    }

    #[test]
    fn rule_glob_matches_long_id() {
        let list = IgnoreList::compile(&[policy("aws-s3-*", None, None)]).expect("compile");
        let finding = Finding::new("x", &meta(1, "aws_s3_bucket.a"));
        assert!(list.suppresses(&definition("s3", "enable-versioning"), &finding));
        assert!(!list.suppresses(&definition("cloudtrail", "enable-all-regions"), &finding));
    }

    #[test]
    fn path_and_reference_narrow_the_match() {
        let list = IgnoreList::compile(&[policy(
            "*",
            Some("modules/legacy/**"),
            Some("aws_s3_bucket.archive"),
        )])
        .expect("compile");
        let def = definition("s3", "enable-versioning");

        let bucket = Metadata::new(
            Range::new("modules/legacy/s3.tf", 1, 30),
            "aws_s3_bucket.archive",
        );
        let nested = Metadata::new(Range::new("modules/legacy/s3.tf", 12, 12), "")
            .with_parent(&bucket);
        assert!(list.suppresses(&def, &Finding::new("x", &nested)));

        let elsewhere = Metadata::new(Range::new("main.tf", 12, 12), "aws_s3_bucket.archive");
        assert!(!list.suppresses(&def, &Finding::new("x", &elsewhere)));

        let other = Metadata::new(Range::new("modules/legacy/s3.tf", 40, 40), "aws_s3_bucket.b");
        assert!(!list.suppresses(&def, &Finding::new("x", &other)));
    }

    #[test]
    fn invalid_glob_is_a_configuration_error() {
        let err = IgnoreList::compile(&[policy("aws-[s3", None, None)]).unwrap_err();
        assert!(matches!(err, ScanError::InvalidIgnorePattern { .. }));
    }

    #[test]
    fn empty_list_suppresses_nothing() {
        let list = IgnoreList::default();
        assert!(list.is_empty());
        let finding = Finding::new("x", &meta(1, "r"));
        assert!(!list.suppresses(&definition("s3", "enable-versioning"), &finding));
    }
}
