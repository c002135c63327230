use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_CONFIG_V1: &str = "infraguard.config.v1";

/// `infraguard.toml` schema v1.
///
/// Everything is optional; an empty file resolves to the `strict` profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InfraguardConfigV1 {
    /// Optional schema string for tooling (`infraguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default), `balanced`, or `critical`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Rules below this severity are not evaluated: `low`, `medium`, `high`, `critical`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_severity: Option<String>,

    /// Evaluate rules on a worker pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Map of rule long id -> config.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,

    /// Accepted risks. Matching failures are reported as ignored.
    #[serde(default, rename = "ignore", skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<IgnoreConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// `true` runs the rule even below `min_severity`; `false` never runs it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IgnoreConfig {
    /// Glob over rule long ids, e.g. `aws-s3-*`.
    pub rule: String,

    /// Glob over the source file of the flagged value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Logical reference of the flagged resource, e.g. `aws_s3_bucket.archive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}
