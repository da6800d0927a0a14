//! s3sync-core: Core library for the s3sync CLI
//!
//! This crate provides the core functionality for s3sync, including:
//! - Path parsing and local/remote path translation
//! - Configuration loading
//! - ObjectStore trait for bucket operations
//! - The upload/download transfer engine
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the engine to be tested against in-memory stores.

pub mod config;
pub mod error;
pub mod options;
pub mod path;
pub mod sync;
pub mod traits;
pub mod translate;

#[cfg(test)]
mod memory;

pub use config::{ClientConfig, Config, ConfigManager};
pub use error::{Error, Result};
pub use options::{Direction, TransferOptions};
pub use path::{ParsedPath, RemoteLocator, parse_path};
pub use sync::{SyncSummary, Transfer};
pub use traits::{CannedAcl, ListingPage, ObjectReader, ObjectStore};
