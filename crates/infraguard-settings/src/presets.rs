use infraguard_domain::policy::EffectiveConfig;
use infraguard_types::Severity;

pub const PROFILES: [&str; 3] = ["strict", "balanced", "critical"];

/// Preset profiles are opinionated defaults. `None` for an unknown name.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    let min_severity = match profile {
        "strict" => Severity::Low,
        "balanced" => Severity::Medium,
        "critical" => Severity::Critical,
        _ => return None,
    };
    Some(EffectiveConfig {
        profile: profile.to_string(),
        min_severity,
        ..EffectiveConfig::default()
    })
}
