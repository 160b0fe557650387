//! S3-backed object source.

use async_trait::async_trait;
use aws_sdk_s3::Client;

use crate::error::IoError;
use crate::io::S3RangeReader;

use super::ObjectSource;

/// S3-backed implementation of `ObjectSource`.
///
/// Keys are resolved inside a single bucket, optionally under a fixed prefix.
///
/// # Example
///
/// ```ignore
/// use imgprobe::io::create_s3_client;
/// use imgprobe::source::S3ObjectSource;
///
/// let client = create_s3_client(None, "us-east-1").await;
/// let source = S3ObjectSource::new(client, "my-bucket".to_string())
///     .with_prefix(Some("uploads/".to_string()));
///
/// // The key "cat.jpg" becomes the S3 key "uploads/cat.jpg"
/// let reader = source.open("cat.jpg").await?;
/// ```
#[derive(Clone)]
pub struct S3ObjectSource {
    client: Client,
    bucket: String,
    prefix: Option<String>,
}

impl S3ObjectSource {
    /// Create a new S3ObjectSource for the given bucket.
    ///
    /// # Arguments
    /// * `client` - AWS S3 client to use for requests
    /// * `bucket` - S3 bucket name containing the images
    pub fn new(client: Client, bucket: String) -> Self {
        Self {
            client,
            bucket,
            prefix: None,
        }
    }

    /// Resolve every key under `prefix`. Empty prefixes are ignored.
    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Get the key prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Full S3 key for an object key.
    pub fn object_key(&self, key: &str) -> String {
        let key = key.trim_start_matches('/');
        match &self.prefix {
            Some(prefix) if prefix.ends_with('/') => format!("{}{}", prefix, key),
            Some(prefix) => format!("{}/{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[async_trait]
impl ObjectSource for S3ObjectSource {
    type Reader = S3RangeReader;

    async fn open(&self, key: &str) -> Result<Self::Reader, IoError> {
        S3RangeReader::new(self.client.clone(), self.bucket.clone(), self.object_key(key)).await
    }
}
