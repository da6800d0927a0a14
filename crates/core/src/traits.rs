//! ObjectStore trait definition
//!
//! This trait defines the three bucket operations the transfer engine needs.
//! It keeps the engine decoupled from the S3 SDK and lets tests substitute
//! an in-memory store or a mock.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;
use crate::path::RemoteLocator;

/// Streaming body of a fetched object
pub type ObjectReader = Box<dyn AsyncRead + Send + Unpin>;

/// One page of a delimiter listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Keys of objects directly under the listed prefix
    pub objects: Vec<String>,

    /// Child prefixes, each ending with the delimiter
    pub common_prefixes: Vec<String>,

    /// Token for the next page when the listing is truncated
    pub next_continuation_token: Option<String>,
}

/// Canned access-control setting applied to uploaded objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CannedAcl {
    /// Only the object owner has access
    Private,
    /// Object owner and bucket owner both get full control
    #[default]
    BucketOwnerFullControl,
}

impl CannedAcl {
    /// Wire value of the ACL header
    pub const fn as_str(self) -> &'static str {
        match self {
            CannedAcl::Private => "private",
            CannedAcl::BucketOwnerFullControl => "bucket-owner-full-control",
        }
    }
}

/// Trait for the bucket operations used by a sync run
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of keys under `location.key`, grouped by `delimiter`
    async fn list_objects(
        &self,
        location: &RemoteLocator,
        delimiter: &str,
        continuation_token: Option<String>,
    ) -> Result<ListingPage>;

    /// Open an object for streaming
    async fn get_object(&self, location: &RemoteLocator) -> Result<ObjectReader>;

    /// Store `data` under `location.key`
    async fn put_object(
        &self,
        location: &RemoteLocator,
        data: Vec<u8>,
        content_type: Option<String>,
        acl: CannedAcl,
    ) -> Result<()>;
}
