use super::IdentityService;
use crate::{Error, Result};
use async_trait::async_trait;
use aws_sdk_iam::Client as IamClient;

pub struct IdentityClient {
    client: IamClient,
}

impl IdentityClient {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: IamClient::new(sdk_config),
        }
    }
}

/// Extract the account id from a principal ARN of the form
/// `arn:aws:iam::ACCOUNT-ID:user/USER-NAME`.
pub fn account_id_from_arn(arn: &str) -> Result<String> {
    let parts: Vec<&str> = arn.split(':').collect();
    if parts.len() < 5 {
        return Err(Error::Identity(format!("Invalid ARN format: {}", arn)));
    }
    Ok(parts[4].to_string())
}

#[async_trait]
impl IdentityService for IdentityClient {
    async fn caller_account_id(&self) -> Result<String> {
        let response = self
            .client
            .get_user()
            .send()
            .await
            .map_err(|e| Error::Identity(format!("Failed to get user info: {}", e)))?;

        let user = response
            .user()
            .ok_or_else(|| Error::Identity("User missing from response".to_string()))?;

        account_id_from_arn(user.arn())
    }
}
