//! Object storage: buckets and public access blocks.

use crate::{BoolValue, HasMetadata, Metadata, StringValue};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct S3 {
    pub buckets: Vec<Bucket>,
    /// Access blocks declared as standalone resources. Blocks declared inline on a bucket live
    /// on [`Bucket::public_access_block`] instead and are not repeated here.
    pub public_access_blocks: Vec<PublicAccessBlock>,
}

impl S3 {
    /// Buckets plus access blocks, counting inline blocks once under their bucket.
    pub fn resource_count(&self) -> usize {
        let inline_blocks = self
            .buckets
            .iter()
            .filter(|b| b.public_access_block.is_some())
            .count();
        self.buckets.len() + inline_blocks + self.public_access_blocks.len()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bucket {
    pub metadata: Metadata,
    pub name: StringValue,
    pub acl: StringValue,
    pub versioning: Versioning,
    pub encryption: Encryption,
    pub logging: Logging,
    pub public_access_block: Option<PublicAccessBlock>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Versioning {
    pub metadata: Metadata,
    pub enabled: BoolValue,
    pub mfa_delete: BoolValue,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Encryption {
    pub metadata: Metadata,
    pub enabled: BoolValue,
    pub algorithm: StringValue,
    pub kms_key_id: StringValue,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub metadata: Metadata,
    pub enabled: BoolValue,
    pub target_bucket: StringValue,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicAccessBlock {
    pub metadata: Metadata,
    /// Name of the bucket this block applies to, when declared separately.
    pub bucket: StringValue,
    pub block_public_acls: BoolValue,
    pub block_public_policy: BoolValue,
    pub ignore_public_acls: BoolValue,
    pub restrict_public_buckets: BoolValue,
}

impl HasMetadata for Bucket {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl HasMetadata for Versioning {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl HasMetadata for Encryption {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl HasMetadata for Logging {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl HasMetadata for PublicAccessBlock {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
