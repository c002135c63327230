//! Fuzz target for state decoding and evaluation.
//!
//! Goal: decoding arbitrary JSON and evaluating every builtin rule against whatever decodes must
//! **never panic** and never produce a faulted result.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_state_json
//! ```

#![no_main]

use infraguard_domain::{Registry, evaluate};
use infraguard_state::State;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(state) = serde_json::from_slice::<State>(data) else {
        return;
    };
    let Ok(registry) = Registry::builtin() else {
        return;
    };

    let results = evaluate(registry.all(), &state);
    assert!(results.len() >= registry.len());
    assert!(results.iter().all(|r| !r.is_fault()));
});
