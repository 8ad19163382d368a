use super::{ObjectStorage, DEFAULT_REGION};
use crate::{Error, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, PublicAccessBlockConfiguration,
};
use aws_sdk_s3::Client as S3Client;

pub struct StorageClient {
    client: S3Client,
}

impl StorageClient {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: S3Client::new(sdk_config),
        }
    }
}

/// Location constraint for a bucket-create call.
///
/// us-east-1 is the S3 default; naming it explicitly is rejected by the
/// API, so the constraint is only set for every other region.
fn location_constraint(region: &str) -> Option<BucketLocationConstraint> {
    if region == DEFAULT_REGION {
        None
    } else {
        Some(BucketLocationConstraint::from(region))
    }
}

#[async_trait]
impl ObjectStorage for StorageClient {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()> {
        let configuration = location_constraint(region).map(|constraint| {
            CreateBucketConfiguration::builder()
                .location_constraint(constraint)
                .build()
        });

        self.client
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(configuration)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to create bucket: {}", e)))?;

        Ok(())
    }

    async fn block_public_access(&self, bucket: &str) -> Result<()> {
        let configuration = PublicAccessBlockConfiguration::builder()
            .block_public_acls(true)
            .ignore_public_acls(true)
            .block_public_policy(true)
            .restrict_public_buckets(true)
            .build();

        self.client
            .put_public_access_block()
            .bucket(bucket)
            .public_access_block_configuration(configuration)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to block public access: {}", e)))?;

        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .cache_control(cache_control)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to upload file {}: {}", key, e)))?;

        Ok(())
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<()> {
        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to attach bucket policy: {}", e)))?;

        Ok(())
    }
}
