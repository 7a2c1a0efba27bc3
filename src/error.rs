use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the edges of the crate: loading input, parsing
/// arguments, serializing and emitting the export document.
///
/// Selection and export operations themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: invalid {what}: {message}", path.display())]
    Parse {
        path: PathBuf,
        what: &'static str,
        message: String,
    },

    #[error("duplicate id '{0}' in forest")]
    DuplicateId(String),

    #[error("unknown node kind '{0}' (expected: plan, suite, case)")]
    UnknownNodeKind(String),

    #[error("invalid node reference '{0}' (expected KIND:ID, e.g. plan:tp-1)")]
    InvalidNodeRef(String),

    #[error("unknown {option} '{value}' (expected: {expected})")]
    UnknownOption {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("nothing selected: select at least one plan, suite or case to export")]
    EmptySelection,

    #[error("{format} serialization failed: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
