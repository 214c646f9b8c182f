//! Error types for doc-comment tree operations
//!
//! Malformed comment text never surfaces here: the parser turns it into
//! erroneous nodes. These errors cover the surrounding plumbing (configuration,
//! I/O, offset tables handed in by a comment source, reference signatures).

use std::path::PathBuf;
use thiserror::Error;

use crate::reference::ReferenceError;

/// Main error type for doctree operations
#[derive(Debug, Error)]
pub enum DocTreeError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The offset table of a comment does not cover its text
    #[error("Offset table has {actual} entries, expected {expected} for a comment of that length")]
    InvalidOffsetTable { expected: usize, actual: usize },

    /// A reference signature could not be parsed
    #[error("Invalid reference: {0}")]
    Reference(#[from] ReferenceError),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    OffsetTable,
    Reference,
    Internal,
}

impl DocTreeError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocTreeError::ConfigError { .. } => ErrorKind::Config,
            DocTreeError::IoError { .. } => ErrorKind::Io,
            DocTreeError::InvalidOffsetTable { .. } => ErrorKind::OffsetTable,
            DocTreeError::Reference(_) => ErrorKind::Reference,
            DocTreeError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (processing of other comments can continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Reference | ErrorKind::OffsetTable)
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for DocTreeError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
