use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// One entry of a prefix listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<()>;
    /// Lists every object under `prefix`, following continuation tokens.
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectSummary>>;
    async fn delete_object(&self, key: &str) -> Result<()>;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

// SDK errors print only "service error" through Display; keep the cause chain.
fn sdk_error<E>(err: E) -> anyhow::Error
where
    E: std::error::Error,
{
    anyhow::anyhow!("{}", DisplayErrorContext(err))
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectSummary>> {
        let mut objects = Vec::new();
        let mut continuation_token = None;

        loop {
            let res = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token)
                .send()
                .await
                .map_err(sdk_error)?;

            if let Some(contents) = res.contents {
                for object in contents {
                    let Some(key) = object.key else { continue };
                    let last_modified = object.last_modified.and_then(|d| {
                        DateTime::from_timestamp(d.secs(), d.subsec_nanos())
                    });
                    objects.push(ObjectSummary {
                        key,
                        size: object.size.and_then(|s| u64::try_from(s).ok()).unwrap_or(0),
                        last_modified,
                    });
                }
            }

            if res.is_truncated.unwrap_or(false) && res.next_continuation_token.is_some() {
                continuation_token = res.next_continuation_token;
            } else {
                break;
            }
        }

        Ok(objects)
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }
}

/// Stands in for the store when the client could not be built. Every call
/// fails with the reason construction failed.
pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl StorageService for UnavailableStorage {
    async fn put_object(&self, _key: &str, _data: Bytes, _content_type: &str) -> Result<()> {
        Err(anyhow::anyhow!("{}", self.reason))
    }

    async fn list_objects(&self, _prefix: &str) -> Result<Vec<ObjectSummary>> {
        Err(anyhow::anyhow!("{}", self.reason))
    }

    async fn delete_object(&self, _key: &str) -> Result<()> {
        Err(anyhow::anyhow!("{}", self.reason))
    }
}
