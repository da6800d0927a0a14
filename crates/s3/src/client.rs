//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3sync-core.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use s3sync_core::{
    CannedAcl, ClientConfig, Error, ListingPage, ObjectReader, ObjectStore, RemoteLocator, Result,
};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from an explicit client configuration
    ///
    /// Credentials come from the SDK's default chain, scoped to
    /// `config.profile` when set. They are resolved here so a missing or
    /// broken credential setup fails before any transfer starts.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| Error::Auth("no credentials provider available".into()))?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| Error::Auth(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            profile = config.profile.as_deref().unwrap_or("default"),
            region = ?sdk_config.region(),
            endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
            "created S3 client"
        );

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

/// Map an SDK failure onto the core error classes
fn map_sdk_error<E, R>(err: SdkError<E, R>, location: &RemoteLocator) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_owned);
    classify(code.as_deref(), location, DisplayErrorContext(&err).to_string())
}

fn classify(code: Option<&str>, location: &RemoteLocator, message: String) -> Error {
    match code {
        Some("NoSuchKey" | "NotFound" | "NoSuchBucket") => Error::NotFound(location.to_string()),
        Some(
            "AccessDenied"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken"
            | "InvalidToken",
        ) => Error::Auth(message),
        _ => Error::Network(message),
    }
}

fn canned_acl(acl: CannedAcl) -> ObjectCannedAcl {
    match acl {
        CannedAcl::Private => ObjectCannedAcl::Private,
        CannedAcl::BucketOwnerFullControl => ObjectCannedAcl::BucketOwnerFullControl,
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(
        &self,
        location: &RemoteLocator,
        delimiter: &str,
        continuation_token: Option<String>,
    ) -> Result<ListingPage> {
        let mut request = self
            .inner
            .list_objects_v2()
            .bucket(&location.bucket)
            .delimiter(delimiter);

        if !location.key.is_empty() {
            request = request.prefix(&location.key);
        }

        if let Some(token) = continuation_token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_sdk_error(e, location))?;

        let objects = response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();

        let common_prefixes = response
            .common_prefixes()
            .iter()
            .filter_map(|prefix| prefix.prefix().map(str::to_string))
            .collect();

        let next_continuation_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ListingPage {
            objects,
            common_prefixes,
            next_continuation_token,
        })
    }

    async fn get_object(&self, location: &RemoteLocator) -> Result<ObjectReader> {
        let response = self
            .inner
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, location))?;

        Ok(Box::new(Box::pin(response.body.into_async_read())))
    }

    async fn put_object(
        &self,
        location: &RemoteLocator,
        data: Vec<u8>,
        content_type: Option<String>,
        acl: CannedAcl,
    ) -> Result<()> {
        let body = ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .acl(canned_acl(acl))
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| map_sdk_error(e, location))?;

        Ok(())
    }
}
