use crate::rule::RuleDefinition;
use infraguard_state::aws::cloudtrail::Trail;
use infraguard_state::aws::s3::{Bucket, PublicAccessBlock, Versioning};
use infraguard_state::{BoolValue, Managed, Metadata, State, StringValue};
use infraguard_types::{Provider, Range, Severity};

pub const FILE: &str = "main.tf";

pub fn definition(service: &'static str, code: &'static str) -> RuleDefinition {
    RuleDefinition {
        provider: Provider::Aws,
        service,
        short_code: code,
        summary: "Test rule summary",
        impact: "Test rule impact",
        resolution: "Fix the test resource",
        explanation: "",
        links: &["https://example.com/rules/test"],
        severity: Severity::Medium,
    }
}

pub fn meta(line: u32, reference: &str) -> Metadata {
    Metadata::new(Range::new(FILE, line, line), reference)
}

/// `Some(v)` is an explicit value declared at `line`; `None` is an unset default with no
/// source declaration.
pub fn flag(value: Option<bool>, line: u32, reference: &str) -> BoolValue {
    match value {
        Some(v) => Managed::explicit(v, meta(line, reference)),
        None => BoolValue::default(),
    }
}

pub fn text(value: &str, line: u32, reference: &str) -> StringValue {
    Managed::explicit(value.to_string(), meta(line, reference))
}

/// A bucket declared at `line` whose nested attributes sit on the lines just below it.
pub fn bucket(name: &str, line: u32) -> Bucket {
    let reference = format!("aws_s3_bucket.{name}");
    let metadata = meta(line, &reference);
    Bucket {
        name: text(name, line + 1, &reference),
        metadata,
        ..Bucket::default()
    }
}

pub fn with_versioning(mut bucket: Bucket, enabled: Option<bool>) -> Bucket {
    let line = bucket.metadata.range().start_line + 2;
    let block = meta(line, "versioning").with_parent(&bucket.metadata);
    let enabled = match enabled {
        Some(v) => Managed::explicit(v, meta(line + 1, "versioning.enabled").with_parent(&block)),
        None => BoolValue::default(),
    };
    bucket.versioning = Versioning {
        metadata: block,
        enabled,
        mfa_delete: BoolValue::default(),
    };
    bucket
}

/// A standalone public access block. Each flag sits on its own line below the block.
pub fn access_block(
    line: u32,
    reference: &str,
    acls: Option<bool>,
    policy: Option<bool>,
    ignore: Option<bool>,
    restrict: Option<bool>,
) -> PublicAccessBlock {
    let metadata = meta(line, reference);
    PublicAccessBlock {
        block_public_acls: nested_flag(acls, line + 1, &metadata),
        block_public_policy: nested_flag(policy, line + 2, &metadata),
        ignore_public_acls: nested_flag(ignore, line + 3, &metadata),
        restrict_public_buckets: nested_flag(restrict, line + 4, &metadata),
        bucket: StringValue::default(),
        metadata,
    }
}

fn nested_flag(value: Option<bool>, line: u32, parent: &Metadata) -> BoolValue {
    match value {
        Some(v) => Managed::explicit(v, meta(line, "").with_parent(parent)),
        None => BoolValue::default(),
    }
}

pub fn trail(
    name: &str,
    line: u32,
    multi_region: Option<bool>,
    log_validation: Option<bool>,
) -> Trail {
    let reference = format!("aws_cloudtrail.{name}");
    let metadata = meta(line, &reference);
    Trail {
        name: text(name, line + 1, &reference),
        is_multi_region: nested_flag(multi_region, line + 2, &metadata),
        enable_log_file_validation: nested_flag(log_validation, line + 3, &metadata),
        metadata,
        ..Trail::default()
    }
}

pub fn state_with_buckets(buckets: Vec<Bucket>) -> State {
    let mut state = State::default();
    state.aws.s3.buckets = buckets;
    state
}

pub fn state_with_blocks(blocks: Vec<PublicAccessBlock>) -> State {
    let mut state = State::default();
    state.aws.s3.public_access_blocks = blocks;
    state
}

pub fn state_with_trails(trails: Vec<Trail>) -> State {
    let mut state = State::default();
    state.aws.cloudtrail.trails = trails;
    state
}
