//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Fatal import failure. `line` is 1-based.
    #[error("unrecognized entry at line {line}: {message}")]
    UnrecognizedEntry { line: usize, message: String },

    #[error("no file associated with the current hotel")]
    MissingFileAssociation,

    #[error("snapshot error: {context}")]
    Snapshot {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub(crate) fn entry(line: usize, message: impl Into<String>) -> Self {
        Self::UnrecognizedEntry {
            line,
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
