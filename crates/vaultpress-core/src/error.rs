//! Error types for the vaultpress pipeline.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Only [`Error::BrokenLink`] is recoverable: the link is replaced with the
//! not-found placeholder and the document keeps going. Everything else aborts
//! the build.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all vaultpress operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error without path context
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File system error on a known path
    #[error("I/O error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid file path (outside the vault, not valid UTF-8, etc.)
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// Missing or invalid setting
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Internal link that cannot be turned into a site URL
    #[error("Broken link '{target}': {reason}")]
    BrokenLink { target: String, reason: String },

    /// Parse error
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error tied to the path that caused it
    pub fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a broken link error
    pub fn broken_link(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::BrokenLink {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether the build can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::BrokenLink { .. })
    }
}
