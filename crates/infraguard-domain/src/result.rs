//! Result model and the pure findings → results fold.

use crate::finding::{Finding, Findings};
use crate::fingerprint::fingerprint_for_result;
use crate::rule::RuleDefinition;
use crate::suppress::Suppressor;
use infraguard_state::Metadata;
use infraguard_types::{Range, Severity, SeverityCounts, Status};
use std::cmp::Ordering;

/// What happened when a rule's check was invoked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Findings(Findings),
    /// The check panicked; the payload message is kept for diagnostics.
    Fault(String),
}

/// One evaluation outcome. Built once by [`classify`] and never changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanResult {
    status: Status,
    rule: RuleDefinition,
    description: String,
    location: Option<Metadata>,
    fault: bool,
}

impl ScanResult {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn rule(&self) -> &RuleDefinition {
        &self.rule
    }

    pub fn rule_id(&self) -> String {
        self.rule.long_id()
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Metadata of the flagged value. `None` for rule-level results (passes and faults).
    pub fn location(&self) -> Option<&Metadata> {
        self.location.as_ref()
    }

    pub fn range(&self) -> Option<&Range> {
        self.location.as_ref().map(Metadata::range)
    }

    /// True when this result reports a check that panicked rather than a real violation.
    pub fn is_fault(&self) -> bool {
        self.fault
    }

    pub fn fingerprint(&self) -> String {
        let (filename, line, reference) = match &self.location {
            Some(m) => (m.range().filename.as_str(), m.range().start_line, m.effective_reference()),
            None => ("", 0, ""),
        };
        fingerprint_for_result(
            &self.rule_id(),
            self.status.as_str(),
            filename,
            line,
            reference,
            &self.description,
        )
    }
}

/// Fold one rule's outcome into results.
///
/// - no findings: a single `Passed` result for the rule as a whole
/// - n findings: n results, one per finding, `Ignored` where the suppressor accepts it and
///   `Failed` otherwise
/// - fault: a single `Failed` diagnostic result naming the rule and the fault
pub fn classify(
    rule: &RuleDefinition,
    outcome: Outcome,
    suppressor: Option<&dyn Suppressor>,
) -> Vec<ScanResult> {
    match outcome {
        Outcome::Findings(findings) if findings.is_empty() => vec![ScanResult {
            status: Status::Passed,
            rule: *rule,
            description: rule.summary.to_string(),
            location: None,
            fault: false,
        }],
        Outcome::Findings(findings) => findings
            .into_iter()
            .map(|finding| {
                let suppressed = suppressor.is_some_and(|s| s.suppresses(rule, &finding));
                let Finding {
                    description,
                    location,
                } = finding;
                ScanResult {
                    status: if suppressed {
                        Status::Ignored
                    } else {
                        Status::Failed
                    },
                    rule: *rule,
                    description,
                    location: Some(location),
                    fault: false,
                }
            })
            .collect(),
        Outcome::Fault(message) => vec![ScanResult {
            status: Status::Failed,
            rule: *rule,
            description: format!(
                "rule '{}' faulted during evaluation: {}",
                rule.long_id(),
                message
            ),
            location: None,
            fault: true,
        }],
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub passed: u32,
    pub failed: u32,
    pub ignored: u32,
}

/// Results of one evaluation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Results(Vec<ScanResult>);

impl Results {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScanResult> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ScanResult] {
        &self.0
    }

    pub fn with_status(&self, status: Status) -> impl Iterator<Item = &ScanResult> {
        self.0.iter().filter(move |r| r.status == status)
    }

    pub fn passed(&self) -> impl Iterator<Item = &ScanResult> {
        self.with_status(Status::Passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScanResult> {
        self.with_status(Status::Failed)
    }

    pub fn ignored(&self) -> impl Iterator<Item = &ScanResult> {
        self.with_status(Status::Ignored)
    }

    pub fn for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a ScanResult> {
        self.0.iter().filter(move |r| r.rule_id() == rule_id)
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for r in &self.0 {
            match r.status {
                Status::Passed => counts.passed += 1,
                Status::Failed => counts.failed += 1,
                Status::Ignored => counts.ignored += 1,
            }
        }
        counts
    }

    /// Failed results per rule severity.
    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for r in self.failed() {
            counts.bump(r.severity());
        }
        counts
    }

    /// Stable output order: rule id, then file, line, and description.
    pub fn sort_canonical(&mut self) {
        self.0.sort_by(compare_results);
    }

    pub fn into_vec(self) -> Vec<ScanResult> {
        self.0
    }
}

fn compare_results(a: &ScanResult, b: &ScanResult) -> Ordering {
    // Rule-level results (no location) sort after located ones of the same rule.
    let key = |r: &ScanResult| match r.range() {
        Some(range) => (range.filename.as_str().to_string(), range.start_line),
        None => ("~".to_string(), u32::MAX),
    };
    let (af, al) = key(a);
    let (bf, bl) = key(b);

    a.rule_id()
        .cmp(&b.rule_id())
        .then(af.cmp(&bf))
        .then(al.cmp(&bl))
        .then(a.description.cmp(&b.description))
}

impl IntoIterator for Results {
    type Item = ScanResult;
    type IntoIter = std::vec::IntoIter<ScanResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a ScanResult;
    type IntoIter = std::slice::Iter<'a, ScanResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<ScanResult> for Results {
    fn from_iter<I: IntoIterator<Item = ScanResult>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ScanResult> for Results {
    fn extend<I: IntoIterator<Item = ScanResult>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
