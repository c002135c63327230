//! Builtin rule catalog.
//!
//! One file per rule. Each exposes its `DEFINITION` and a `rule()` constructor; [`register_all`]
//! is the only place that needs to change when a rule is added.

use crate::registry::{Registry, RegistryError};
use crate::rule::Rule;

mod cloudtrail;
mod s3;
mod utils;


/// Every builtin rule, in catalog order.
pub fn builtin() -> Vec<Rule> {
    vec![
        s3::enable_versioning::rule(),
        s3::ignore_public_acls::rule(),
        s3::block_public_acls::rule(),
        s3::block_public_policy::rule(),
        s3::no_public_buckets::rule(),
        s3::enable_bucket_encryption::rule(),
        s3::enable_bucket_logging::rule(),
        cloudtrail::enable_all_regions::rule(),
        cloudtrail::enable_log_validation::rule(),
    ]
}

pub fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    for rule in builtin() {
        registry.register(rule)?;
    }
    Ok(())
}
