//! Loading a [`State`] produced by an upstream adapter.

use anyhow::Context;
use camino::Utf8Path;
use infraguard_state::State;
use tracing::debug;

/// Decode a JSON state document.
pub fn load_state_json(text: &str) -> anyhow::Result<State> {
    let state: State = serde_json::from_str(text).context("parse state json")?;
    debug!(resources = state.resource_count(), "state loaded");
    Ok(state)
}

pub fn load_state_file(path: &Utf8Path) -> anyhow::Result<State> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    load_state_json(&text).with_context(|| format!("load state from {path}"))
}
