//! Stable DTOs and IDs used across the infraguard workspace.
//!
//! This crate is intentionally boring:
//! - severity, status, and provider enums shared by every layer
//! - canonical source paths and line ranges used for attribution
//! - stable string IDs for builtin rules
//! - the serialized scan report envelope

#![forbid(unsafe_code)]

pub mod ids;
pub mod location;
pub mod path;
pub mod receipt;

pub use location::Range;
pub use path::SourcePath;
pub use receipt::{
    Provider, ResultRecord, ScanReport, ScanSummary, Severity, SeverityCounts, Status, ToolMeta,
    SCHEMA_REPORT_V1,
};
