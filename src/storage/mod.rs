//! S3 integration for bucket provisioning and asset uploads
//!
//! The bucket is created with public access fully blocked; reads happen
//! only through the CloudFront distribution authorized by the bucket
//! policy.

pub mod client;
pub mod mock;

pub use client::StorageClient;
pub use mock::MockStorageClient;

use crate::Result;
use async_trait::async_trait;

/// Region whose bucket-create call must omit the location constraint.
pub const DEFAULT_REGION: &str = "us-east-1";

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()>;
    async fn block_public_access(&self, bucket: &str) -> Result<()>;
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<()>;
    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<()>;
}
