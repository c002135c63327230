pub mod block_public_acls;
pub mod block_public_policy;
pub mod enable_bucket_encryption;
pub mod enable_bucket_logging;
pub mod enable_versioning;
pub mod ignore_public_acls;
pub mod no_public_buckets;
