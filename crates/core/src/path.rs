//! Path parsing
//!
//! Remote paths have the format `s3://bucket[/key]`. Anything else is
//! treated as a local filesystem path and passed through as-is.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// URI scheme marking an object-storage path
pub const SCHEME: &str = "s3://";

/// A bucket and key parsed from an `s3://` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocator {
    /// Bucket name, never empty
    pub bucket: String,
    /// Object key or key prefix (empty for bucket root)
    pub key: String,
}

impl RemoteLocator {
    /// Create a new RemoteLocator
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Same bucket, different key
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self {
            bucket: self.bucket.clone(),
            key: key.into(),
        }
    }

    /// Check whether `key` lies under this locator's key
    ///
    /// A key is inside when it equals the root, or continues it at a `/`
    /// boundary. `backup-old/x` is not inside `backup`.
    pub fn contains(&self, key: &str) -> bool {
        let root = self.key.as_str();
        if root.is_empty() || key == root {
            return true;
        }
        if root.ends_with('/') {
            return key.starts_with(root);
        }
        key.strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl std::fmt::Display for RemoteLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.bucket, self.key)
    }
}

/// Parsed path that can be either local or remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPath {
    /// Local filesystem path
    Local(PathBuf),
    /// Remote S3 location
    Remote(RemoteLocator),
}

impl ParsedPath {
    /// Check if this is a remote path
    pub fn is_remote(&self) -> bool {
        matches!(self, ParsedPath::Remote(_))
    }

    /// Check if this is a local path
    pub fn is_local(&self) -> bool {
        matches!(self, ParsedPath::Local(_))
    }

    /// Get the remote locator if this is a remote path
    pub fn as_remote(&self) -> Option<&RemoteLocator> {
        match self {
            ParsedPath::Remote(p) => Some(p),
            ParsedPath::Local(_) => None,
        }
    }

    /// Get the local path if this is a local path
    pub fn as_local(&self) -> Option<&PathBuf> {
        match self {
            ParsedPath::Local(p) => Some(p),
            ParsedPath::Remote(_) => None,
        }
    }
}

/// Check if a path string carries the object-storage scheme
pub fn is_remote_uri(path: &str) -> bool {
    path.starts_with(SCHEME)
}

/// Parse an `s3://bucket[/key]` URI
///
/// The first `/`-separated segment after the scheme is the bucket. The rest,
/// rejoined with `/`, is the key and may be empty.
pub fn parse_remote_uri(uri: &str) -> Result<RemoteLocator> {
    let rest = uri
        .strip_prefix(SCHEME)
        .ok_or_else(|| Error::InvalidPath(format!("'{uri}' does not begin with {SCHEME}")))?;

    let (bucket, key) = match rest.split_once('/') {
        Some((bucket, key)) => (bucket, key),
        None => (rest, ""),
    };

    if bucket.is_empty() {
        return Err(Error::InvalidPath(format!(
            "Bucket name cannot be empty in '{uri}'"
        )));
    }

    Ok(RemoteLocator::new(bucket, key))
}

/// Parse a path string into a ParsedPath
pub fn parse_path(path: &str) -> Result<ParsedPath> {
    if path.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }

    if is_remote_uri(path) {
        return parse_remote_uri(path).map(ParsedPath::Remote);
    }

    Ok(ParsedPath::Local(PathBuf::from(path)))
}
