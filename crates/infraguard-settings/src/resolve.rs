use crate::model::{InfraguardConfigV1, SCHEMA_CONFIG_V1};
use crate::presets;
use anyhow::Context;
use globset::Glob;
use infraguard_domain::policy::{EffectiveConfig, IgnorePolicy, RulePolicy};
use infraguard_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub min_severity: Option<String>,
    pub parallel: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: InfraguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected {})",
            presets::PROFILES.join("|")
        )
    })?;

    if let Some(sev) = overrides.min_severity.as_deref().or(cfg.min_severity.as_deref()) {
        effective.min_severity = parse_severity(sev)?;
    }

    if let Some(parallel) = overrides.parallel.or(cfg.parallel) {
        effective.parallel = parallel;
    }

    // Whether ids exist is checked against the registry at scan time, so every configured id is
    // carried over even when its table sets nothing.
    for (rule_id, rc) in cfg.rules.iter() {
        effective.rules.insert(
            rule_id.clone(),
            RulePolicy {
                enabled: rc.enabled,
            },
        );
    }

    for (i, ignore) in cfg.ignores.iter().enumerate() {
        validate_glob(&ignore.rule).with_context(|| format!("invalid rule glob in ignore #{i}"))?;
        if let Some(path) = ignore.path.as_deref() {
            validate_glob(path).with_context(|| format!("invalid path glob in ignore #{i}"))?;
        }
        effective.ignores.push(IgnorePolicy {
            rule: ignore.rule.clone(),
            path: ignore.path.clone(),
            reference: ignore.reference.clone(),
        });
    }

    Ok(ResolvedConfig { effective })
}

fn validate_glob(pattern: &str) -> anyhow::Result<()> {
    Glob::new(pattern).with_context(|| format!("invalid glob: {pattern}"))?;
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match Severity::parse(v) {
        Some(sev) => Ok(sev),
        None => anyhow::bail!("unknown severity: {v} (expected low|medium|high|critical)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve(toml: &str, overrides: Overrides) -> anyhow::Result<EffectiveConfig> {
        let cfg = parse_config_toml(toml)?;
        Ok(resolve_config(cfg, overrides)?.effective)
    }

    #[test]
    fn empty_config_is_strict() {
        let effective = resolve("", Overrides::default()).expect("resolve");
        assert_eq!(effective.profile, "strict");
        assert_eq!(effective.min_severity, Severity::Low);
        assert!(effective.parallel);
        assert!(effective.rules.is_empty());
        assert!(effective.ignores.is_empty());
    }

    #[test]
    fn profiles_set_min_severity() {
        for (profile, expected) in [
            ("balanced", Severity::Medium),
            ("critical", Severity::Critical),
        ] {
            let effective = resolve(&format!("profile = \"{profile}\""), Overrides::default())
                .expect("resolve");
            assert_eq!(effective.min_severity, expected, "{profile}");
        }
    }

    #[test]
    fn overrides_beat_the_file() {
        let toml = r#"
profile = "critical"
min_severity = "high"
parallel = true
"#;
        let effective = resolve(
            toml,
            Overrides {
                profile: Some("balanced".to_string()),
                min_severity: Some("LOW".to_string()),
                parallel: Some(false),
            },
        )
        .expect("resolve");
        assert_eq!(effective.profile, "balanced");
        assert_eq!(effective.min_severity, Severity::Low);
        assert!(!effective.parallel);
    }

    #[test]
    fn rules_and_ignores_are_carried_over() {
        let toml = r#"
[rules."aws-s3-enable-bucket-logging"]
enabled = false

[rules."aws-s3-enable-versioning"]

[[ignore]]
rule = "aws-s3-*"
path = "modules/legacy/**"
reference = "aws_s3_bucket.archive"
"#;
        let effective = resolve(toml, Overrides::default()).expect("resolve");
        assert_eq!(
            effective.rules.get("aws-s3-enable-bucket-logging"),
            Some(&RulePolicy {
                enabled: Some(false)
            })
        );
        // A table without `enabled` still names the rule so it can be checked against the registry.
        assert_eq!(
            effective.rules.get("aws-s3-enable-versioning"),
            Some(&RulePolicy { enabled: None })
        );
        assert_eq!(
            effective.ignores,
            vec![IgnorePolicy {
                rule: "aws-s3-*".to_string(),
                path: Some("modules/legacy/**".to_string()),
                reference: Some("aws_s3_bucket.archive".to_string()),
            }]
        );
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = resolve("profile = \"lenient\"", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unknown profile"));

        let err = resolve("min_severity = \"severe\"", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unknown severity"));

        let err = resolve("[[ignore]]\nrule = \"aws-[\"\n", Overrides::default()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid rule glob"));

        assert!(resolve("parallel = \"yes\"", Overrides::default()).is_err());
    }

    #[test]
    fn schema_must_be_v1_when_present() {
        let toml = format!("schema = \"{SCHEMA_CONFIG_V1}\"");
        assert!(resolve(&toml, Overrides::default()).is_ok());

        let err = resolve("schema = \"infraguard.config.v2\"", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unsupported config schema"));
    }
}
