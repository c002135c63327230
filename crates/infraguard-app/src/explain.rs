//! The `explain` use case: look up rule documentation.

use infraguard_domain::{Registry, RuleDefinition};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(RuleDefinition),
    /// Unknown identifier; includes every registered long id.
    NotFound {
        identifier: String,
        available: Vec<String>,
    },
}

/// Look up a rule by long id.
pub fn run_explain(registry: &Registry, identifier: &str) -> ExplainOutput {
    match registry.by_id(identifier.trim()) {
        Some(rule) => ExplainOutput::Found(*rule.definition()),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: registry.ids(),
        },
    }
}

/// Format a rule's documentation for terminal display.
pub fn format_explanation(def: &RuleDefinition) -> String {
    let title = format!("{} ({})", def.long_id(), def.severity);
    let mut out = String::new();

    out.push_str(&title);
    out.push('\n');
    out.push_str(&"=".repeat(title.len()));
    out.push_str("\n\n");
    out.push_str(def.summary);
    out.push_str("\n\n");
    if !def.explanation.is_empty() {
        out.push_str(def.explanation);
        out.push_str("\n\n");
    }
    out.push_str("Impact\n------\n");
    out.push_str(def.impact);
    out.push_str("\n\n");
    out.push_str("Resolution\n----------\n");
    out.push_str(def.resolution);
    out.push('\n');
    if !def.links.is_empty() {
        out.push_str("\nLinks\n-----\n");
        for link in def.links {
            out.push_str(&format!("  - {link}\n"));
        }
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, available: &[String]) -> String {
    let mut out = format!("Unknown rule id: {identifier}\n\nAvailable rules:\n");
    for id in available {
        out.push_str(&format!("  - {id}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use infraguard_types::ids;

    fn registry() -> Registry {
        Registry::builtin().expect("builtin registry")
    }

    #[test]
    fn explain_known_rule() {
        let output = run_explain(&registry(), ids::RULE_AWS_S3_ENABLE_VERSIONING);
        let ExplainOutput::Found(def) = output else {
            panic!("expected Found");
        };
        let formatted = format_explanation(&def);
        assert!(formatted.starts_with("aws-s3-enable-versioning (medium)\n"));
        assert!(formatted.contains("Resolution"));
        assert!(formatted.contains("https://docs.aws.amazon.com/"));
    }

    #[test]
    fn explain_unknown_lists_available_rules() {
        let output = run_explain(&registry(), "aws-s3-not-a-rule");
        let ExplainOutput::NotFound {
            identifier,
            available,
        } = output
        else {
            panic!("expected NotFound");
        };
        assert_eq!(identifier, "aws-s3-not-a-rule");
        assert_eq!(available.len(), 9);

        let formatted = format_not_found(&identifier, &available);
        assert!(formatted.contains("Unknown rule id: aws-s3-not-a-rule"));
        assert!(formatted.contains(ids::RULE_AWS_CLOUDTRAIL_ENABLE_ALL_REGIONS));
    }
}
