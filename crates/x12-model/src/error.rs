use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to callers. Malformed segment content is never an
/// error: handlers default missing elements locally and keep going.
#[derive(Debug, Error)]
pub enum X12Error {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no documents to process")]
    NoDocuments,
    #[error("line item {group_number} has uncommitted edits; commit before regenerating")]
    UncommittedEdit { group_number: usize },
}

pub type Result<T> = std::result::Result<T, X12Error>;
