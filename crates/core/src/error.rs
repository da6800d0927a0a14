//! Error types for s3sync-core
//!
//! Every failure in a run, whether from argument checks, the local filesystem
//! or the object store, is expressed as one of these variants.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for s3sync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3sync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or ambiguous command-line arguments
    #[error("{0}")]
    Usage(String),

    /// Invalid path or key
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error on a specific local path
    #[error("{}: {source}", .path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Authentication or permission failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Local path or remote object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request to the object store failed
    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    /// Attach the local path an IO error happened on
    ///
    /// A missing path becomes `NotFound` so callers see a single "not found"
    /// class regardless of which operation hit it.
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path.display().to_string())
        } else {
            Error::LocalIo { path, source }
        }
    }

    /// Whether this error came from argument validation
    pub const fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::InvalidPath(_))
    }
}
