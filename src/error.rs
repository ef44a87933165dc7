//! Error types shared by the loader, configuration and the reader binary.
//!
//! The section parser and the overlay controller never fail; everything that
//! touches the filesystem or the terminal reports through [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading content or running the reader.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Front matter in a content file could not be parsed.
    #[error("Invalid front matter in {path}: {message}")]
    FrontMatter {
        /// File whose header failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A content data file could not be parsed.
    #[error("Invalid data in {path}: {message}")]
    Data {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// No content exists for the requested slug or route.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Result type alias using folio's Error type.
pub type Result<T> = std::result::Result<T, Error>;
