//! Provider subtrees of the state.

pub mod aws;
