//! CloudFront integration
//!
//! Creates the origin access control that lets the CDN fetch privately from
//! the bucket, and the distribution that serves the site over HTTPS.

pub mod client;
pub mod mock;

pub use client::CdnClient;
pub use mock::MockCdnClient;

use crate::models::{CreatedDistribution, DistributionSpec};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CdnService: Send + Sync {
    async fn create_origin_access_control(&self, name: &str) -> Result<String>;
    async fn create_distribution(&self, spec: &DistributionSpec) -> Result<CreatedDistribution>;
}
