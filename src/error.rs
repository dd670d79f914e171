//! Error types for the extraction library.
//!
//! The CLI layer wraps these in `anyhow` with additional context; library callers
//! can match on [`ExtractError`] directly.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::validate::ValidationError;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(
        "Missing extractor functions. Provide them when creating the parser or dynamically add extractors using 'add_extractor()'"
    )]
    MissingExtractors,

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Failed to read or write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog at line {line}: {message}")]
    PotSyntax { line: usize, message: String },

    #[error("Invalid glob pattern \"{pattern}\": {message}")]
    GlobPattern { pattern: String, message: String },

    #[error(
        "Conflicting plural text for message \"{text}\"{}: kept \"{existing}\", rejected \"{rejected}\"",
        context.as_ref().map(|c| format!(" (context \"{c}\")")).unwrap_or_default()
    )]
    PluralConflict {
        text: String,
        context: Option<String>,
        existing: String,
        rejected: String,
    },
}

impl ExtractError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
