use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use url::Url;

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;

/// S3-backed image store.
///
/// Uploads are a single `PutObject` with the filename as key and the declared
/// content type. The reported location is the object's public URL.
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base: Url,
}

impl S3BlobStore {
    /// Build a store from the shared SDK config.
    ///
    /// A custom `endpoint_url` (MinIO, LocalStack) is set on this client
    /// only, and switches to path-style addressing
    /// (`{endpoint}/{bucket}/{key}`).
    pub fn new(
        sdk_config: &SdkConfig,
        bucket: impl Into<String>,
        region: &str,
        endpoint_url: Option<&str>,
    ) -> StoreResult<Self> {
        let bucket = bucket.into();
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());
        let public_base = public_base(&bucket, region, endpoint_url)?;
        Ok(Self {
            client,
            bucket,
            public_base,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, key: &str, content_type: &str, bytes: Bytes) -> StoreResult<String> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StoreError::unavailable("s3 put_object", DisplayErrorContext(&e)))?;

        tracing::debug!(bucket = %self.bucket, key, size, "Uploaded object");
        object_location(&self.public_base, key)
    }
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("bucket", &self.bucket)
            .field("public_base", &self.public_base.as_str())
            .finish()
    }
}

/// Base URL under which objects of `bucket` are publicly reachable.
fn public_base(bucket: &str, region: &str, endpoint_url: Option<&str>) -> StoreResult<Url> {
    let invalid = |e: url::ParseError| StoreError::unavailable("s3 endpoint", e);
    match endpoint_url {
        Some(endpoint) => {
            let mut url = Url::parse(endpoint).map_err(invalid)?;
            url.path_segments_mut()
                .map_err(|_| StoreError::unavailable("s3 endpoint", "endpoint cannot be a base URL"))?
                .pop_if_empty()
                .push(bucket);
            Ok(url)
        }
        None => Url::parse(&format!("https://{bucket}.s3.{region}.amazonaws.com/")).map_err(invalid),
    }
}

/// Append `key` to `base` as a single percent-encoded path segment.
fn object_location(base: &Url, key: &str) -> StoreResult<String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| StoreError::unavailable("s3 location", "base URL cannot hold a path"))?
        .pop_if_empty()
        .push(key);
    Ok(url.to_string())
}
