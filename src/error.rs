use std::path::PathBuf;
use thiserror::Error;

/// The host cannot compose or decompose Unicode text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unicode normalization is not supported")]
pub struct UnsupportedNormalization;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read mojibake rules from {path}: {source}")]
    RulesFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mojibake rules: {0}")]
    RulesFormat(#[from] serde_json::Error),

    #[error("invalid sanitation pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("filesystem fault while probing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
