//! Error types for moon-highlighter

use highlight_pdf::PdfError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlighterError {
    #[error("Highlight store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("PDF corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Missing required argument: --{0}")]
    MissingArgument(&'static str),

    #[error("Failed to build highlighted copy: {0}")]
    Annotation(#[source] PdfError),

    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl From<sqlx::Error> for HighlighterError {
    fn from(err: sqlx::Error) -> Self {
        HighlighterError::StoreUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HighlighterError>;
