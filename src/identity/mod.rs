//! Caller identity resolution
//!
//! The bucket policy condition needs the account id that owns the
//! distribution; it is extracted from the caller's IAM user ARN.

pub mod client;
pub mod mock;

pub use client::IdentityClient;
pub use mock::MockIdentityClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn caller_account_id(&self) -> Result<String>;
}
