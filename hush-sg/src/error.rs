//! Error types for hush-sg
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Provider failures never escape a fallback chain; the only
//! error a caller of the orchestrator can observe is `InvalidInput` (or an
//! internal asset-persistence failure).

use thiserror::Error;

/// Main error type for the hush-sg module
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A provider capability failed (network, model not loaded, synthesis)
    ///
    /// Absorbed by fallback chains; surfaces only in tier telemetry.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Asset persistence errors
    #[error("Asset error: {0}")]
    Asset(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<hush_common::Error> for Error {
    fn from(err: hush_common::Error) -> Self {
        match err {
            hush_common::Error::Io(e) => Error::Io(e),
            hush_common::Error::Config(msg) => Error::Config(msg),
            hush_common::Error::InvalidInput(msg) => Error::InvalidInput(msg),
            hush_common::Error::Internal(msg) => Error::Internal(msg),
        }
    }
}

/// Convenience Result type using the hush-sg Error
pub type Result<T> = std::result::Result<T, Error>;
