//! Transfer options
//!
//! Turns the two positional paths of a sync invocation into a validated
//! `TransferOptions`: which side is the bucket, which way data flows.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::{ParsedPath, RemoteLocator, SCHEME, parse_path};

/// Which way files move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Local tree to bucket prefix
    Upload,
    /// Bucket prefix to local tree
    Download,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Upload => write!(f, "upload"),
            Direction::Download => write!(f, "download"),
        }
    }
}

/// Resolved description of one sync run
///
/// Exactly one of `source` and `destination` is a bucket-relative key; the
/// other is a local filesystem path. Which one is given by `direction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOptions {
    pub bucket: String,
    pub source: String,
    pub destination: String,
    pub direction: Direction,
    pub dry_run: bool,
}

impl TransferOptions {
    /// Resolve a source/destination pair
    ///
    /// Exactly one of the two must begin with `s3://`.
    pub fn resolve(source: &str, destination: &str, dry_run: bool) -> Result<Self> {
        let source = parse_path(source)?;
        let destination = parse_path(destination)?;

        match (source, destination) {
            (ParsedPath::Local(local), ParsedPath::Remote(remote)) => Ok(Self {
                bucket: remote.bucket,
                source: local.to_string_lossy().into_owned(),
                destination: remote.key,
                direction: Direction::Upload,
                dry_run,
            }),
            (ParsedPath::Remote(remote), ParsedPath::Local(local)) => Ok(Self {
                bucket: remote.bucket,
                source: remote.key,
                destination: local.to_string_lossy().into_owned(),
                direction: Direction::Download,
                dry_run,
            }),
            _ => Err(Error::Usage(format!(
                "either source or destination should begin with {SCHEME}"
            ))),
        }
    }

    /// The bucket-side root of this run
    pub fn remote_root(&self) -> RemoteLocator {
        let key = match self.direction {
            Direction::Upload => &self.destination,
            Direction::Download => &self.source,
        };
        RemoteLocator::new(&self.bucket, key.as_str())
    }

    /// The filesystem-side root of this run
    pub fn local_root(&self) -> PathBuf {
        let path = match self.direction {
            Direction::Upload => &self.source,
            Direction::Download => &self.destination,
        };
        Path::new(path).to_path_buf()
    }
}
