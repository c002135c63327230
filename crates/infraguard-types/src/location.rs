use crate::SourcePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A line range inside one source file.
///
/// Lines are 1-based and inclusive. A zero `start_line` means the producer had no line
/// information for the value (for example, an implicit default).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Range {
    pub filename: SourcePath,
    #[serde(default)]
    pub start_line: u32,
    #[serde(default)]
    pub end_line: u32,
    /// Where the file came from when it is not part of the scanned tree (module source, registry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prefix: Option<String>,
}

impl Range {
    pub fn new(filename: impl Into<SourcePath>, start_line: u32, end_line: u32) -> Self {
        Self {
            filename: filename.into(),
            start_line,
            end_line: end_line.max(start_line),
            source_prefix: None,
        }
    }

    pub fn is_multi_line(&self) -> bool {
        self.end_line > self.start_line
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.source_prefix {
            write!(f, "{prefix}:")?;
        }
        if self.is_multi_line() {
            write!(f, "{}:{}-{}", self.filename, self.start_line, self.end_line)
        } else {
            write!(f, "{}:{}", self.filename, self.start_line)
        }
    }
}
