use crate::providers::aws::Aws;
use serde::{Deserialize, Serialize};

/// Root of the normalized infrastructure tree: provider → service → resources.
///
/// Rules only ever receive `&State`, so a state is read-only for the duration of a scan and may be
/// shared across evaluation threads.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub aws: Aws,
}

impl State {
    /// Number of resource instances across all providers.
    pub fn resource_count(&self) -> usize {
        self.aws.resource_count()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_count() == 0
    }
}
