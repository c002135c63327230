//! Audit trails.

use crate::{BoolValue, HasMetadata, Metadata, StringValue};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudTrail {
    pub trails: Vec<Trail>,
}

impl CloudTrail {
    pub fn resource_count(&self) -> usize {
        self.trails.len()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trail {
    pub metadata: Metadata,
    pub name: StringValue,
    pub is_multi_region: BoolValue,
    pub enable_log_file_validation: BoolValue,
    pub kms_key_id: StringValue,
    pub is_logging: BoolValue,
}

impl HasMetadata for Trail {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
