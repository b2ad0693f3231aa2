//! Error handling for the discogen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use discogen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for discogen generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for discogen generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Discovery document is missing or misdeclares a required field
    #[error("malformed discovery document: {0}")]
    MalformedDocument(String),

    /// An identifier still collides after unique-suffix disambiguation
    #[error("identifier collision: {0}")]
    IdentifierCollision(String),

    /// The renderer cannot express a code-model construct in the target grammar
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new malformed-document error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Create a new identifier-collision error
    pub fn collision<S: Into<String>>(msg: S) -> Self {
        Self::IdentifierCollision(msg.into())
    }

    /// Create a new unsupported-construct error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedConstruct(msg.into())
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}
