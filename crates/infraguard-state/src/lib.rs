//! The state model the rule engine evaluates.
//!
//! A producer (template parser, API introspection, test code) builds a [`State`] tree once per
//! scan. Every flaggable leaf is a [`Managed`] value carrying its own [`Metadata`], so rules can
//! point at the exact line that is wrong rather than the enclosing resource.
//!
//! Nothing here performs IO.

#![forbid(unsafe_code)]

mod metadata;
mod value;

pub mod providers;
mod state;

pub use metadata::{HasMetadata, Metadata};
pub use providers::aws;
pub use state::State;
pub use value::{BoolValue, IntValue, Managed, Provenance, StringValue, TriState};
