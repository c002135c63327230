//! Stable identifiers for builtin rules.
//!
//! A rule's long id is `{provider}-{service}-{short_code}`. The short codes and services below are
//! the inputs; the `RULE_*` constants are the derived long ids, kept here so settings, reports, and
//! tests can name rules without depending on the domain crate.

// Services
pub const SERVICE_S3: &str = "s3";
pub const SERVICE_CLOUDTRAIL: &str = "cloudtrail";

// Short codes: aws/s3
pub const CODE_ENABLE_VERSIONING: &str = "enable-versioning";
pub const CODE_IGNORE_PUBLIC_ACLS: &str = "ignore-public-acls";
pub const CODE_BLOCK_PUBLIC_ACLS: &str = "block-public-acls";
pub const CODE_BLOCK_PUBLIC_POLICY: &str = "block-public-policy";
pub const CODE_NO_PUBLIC_BUCKETS: &str = "no-public-buckets";
pub const CODE_ENABLE_BUCKET_ENCRYPTION: &str = "enable-bucket-encryption";
pub const CODE_ENABLE_BUCKET_LOGGING: &str = "enable-bucket-logging";

// Short codes: aws/cloudtrail
pub const CODE_ENABLE_ALL_REGIONS: &str = "enable-all-regions";
pub const CODE_ENABLE_LOG_VALIDATION: &str = "enable-log-validation";

// Long ids
pub const RULE_AWS_S3_ENABLE_VERSIONING: &str = "aws-s3-enable-versioning";
pub const RULE_AWS_S3_IGNORE_PUBLIC_ACLS: &str = "aws-s3-ignore-public-acls";
pub const RULE_AWS_S3_BLOCK_PUBLIC_ACLS: &str = "aws-s3-block-public-acls";
pub const RULE_AWS_S3_BLOCK_PUBLIC_POLICY: &str = "aws-s3-block-public-policy";
pub const RULE_AWS_S3_NO_PUBLIC_BUCKETS: &str = "aws-s3-no-public-buckets";
pub const RULE_AWS_S3_ENABLE_BUCKET_ENCRYPTION: &str = "aws-s3-enable-bucket-encryption";
pub const RULE_AWS_S3_ENABLE_BUCKET_LOGGING: &str = "aws-s3-enable-bucket-logging";
pub const RULE_AWS_CLOUDTRAIL_ENABLE_ALL_REGIONS: &str = "aws-cloudtrail-enable-all-regions";
pub const RULE_AWS_CLOUDTRAIL_ENABLE_LOG_VALIDATION: &str = "aws-cloudtrail-enable-log-validation";
