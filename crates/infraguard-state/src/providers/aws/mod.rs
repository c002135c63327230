//! Amazon Web Services.

pub mod cloudtrail;
pub mod s3;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aws {
    pub s3: s3::S3,
    pub cloudtrail: cloudtrail::CloudTrail,
}

impl Aws {
    pub fn resource_count(&self) -> usize {
        self.s3.resource_count() + self.cloudtrail.resource_count()
    }
}
