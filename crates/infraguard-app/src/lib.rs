//! Use case orchestration for infraguard.
//!
//! This crate provides the application layer: use cases that coordinate state loading, settings,
//! and the domain engine. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! A front end depends on this; it only handles argument parsing and presentation.

#![forbid(unsafe_code)]

mod explain;
mod logging;
mod report;
mod scan;
mod state;

pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use logging::{LOG_ENV, default_filter, init_logging};
pub use report::{build_report, parse_report_json, record_for, serialize_report, write_report};
pub use scan::{ScanInput, ScanOutput, failure_exit_code, run_scan};
pub use state::{load_state_file, load_state_json};
