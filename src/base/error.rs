//! Error types for the documentation pipeline.
//!
//! Only two kinds of failure surface as errors: broken programmer contracts
//! inside the incremental database and I/O failures while reading sources.
//! Malformed comment text never errors; it degrades to literal text.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NdocError>;

/// Errors that can occur while reparsing and committing a file.
#[derive(Debug, Error)]
pub enum NdocError {
    /// A SourceDb invariant was broken. Unrecoverable: continuing would corrupt
    /// every later diff.
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    /// Reading a source file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NdocError {
    /// Create an I/O error for the given file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error reports a broken programmer contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}

/// A broken rule of the SourceDb protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("tried to add item {item:?} to {extension} but it already had definitions")]
    AddedDefinedItem {
        extension: &'static str,
        item: String,
    },

    #[error("tried to delete item {item:?} from {extension} but it still has definitions")]
    DeletedDefinedItem {
        extension: &'static str,
        item: String,
    },

    #[error("tried to use undefined item {item:?} in {extension}")]
    UnknownItem {
        extension: &'static str,
        item: String,
    },

    #[error("{extension} does not use definition objects, so {item:?} cannot be changed")]
    ChangedExistenceOnly {
        extension: &'static str,
        item: String,
    },

    #[error("{extension} item {item:?} has no definition in {file}")]
    MissingDefinition {
        extension: &'static str,
        item: String,
        file: String,
    },

    #[error("tried to watch {requested} while {active} is still being watched")]
    WatchAlreadyActive { active: String, requested: String },

    #[error("tried to analyze watched file changes when no file was being watched")]
    NoWatchedFile,
}
