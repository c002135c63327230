use thiserror::Error;

/// Configuration problems detected before any rule runs.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("configuration names an unknown rule: {id}")]
    UnknownRule { id: String },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
