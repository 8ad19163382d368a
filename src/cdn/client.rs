use super::CdnService;
use crate::models::{CreatedDistribution, DistributionSpec};
use crate::{Error, Result};
use async_trait::async_trait;
use aws_sdk_cloudfront::types::{
    CustomErrorResponse, CustomErrorResponses, DefaultCacheBehavior, DistributionConfig, Origin,
    OriginAccessControlConfig, OriginAccessControlOriginTypes, OriginAccessControlSigningBehaviors,
    OriginAccessControlSigningProtocols, Origins, S3OriginConfig, ViewerProtocolPolicy,
};
use aws_sdk_cloudfront::Client as CloudFrontClient;

pub struct CdnClient {
    client: CloudFrontClient,
}

impl CdnClient {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: CloudFrontClient::new(sdk_config),
        }
    }
}

fn invalid_config(e: impl std::fmt::Display) -> Error {
    Error::Cdn(format!("Invalid distribution config: {}", e))
}

/// Translate the crate-owned spec into the CloudFront API request shape.
fn to_distribution_config(spec: &DistributionSpec) -> Result<DistributionConfig> {
    let origin = Origin::builder()
        .id(&spec.origin_id)
        .domain_name(&spec.origin_domain)
        .origin_access_control_id(&spec.origin_access_control_id)
        // With an origin access control the legacy identity must be present
        // but empty.
        .s3_origin_config(
            S3OriginConfig::builder()
                .origin_access_identity("")
                .build(),
        )
        .build()
        .map_err(invalid_config)?;

    let origins = Origins::builder()
        .quantity(1)
        .items(origin)
        .build()
        .map_err(invalid_config)?;

    let default_cache_behavior = DefaultCacheBehavior::builder()
        .target_origin_id(&spec.origin_id)
        .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
        .compress(spec.compress)
        .cache_policy_id(&spec.cache_policy_id)
        .build()
        .map_err(invalid_config)?;

    let mut builder = DistributionConfig::builder()
        .caller_reference(&spec.caller_reference)
        .comment(&spec.comment)
        .enabled(spec.enabled)
        .is_ipv6_enabled(spec.ipv6_enabled)
        .origins(origins)
        .default_cache_behavior(default_cache_behavior)
        .set_default_root_object(spec.default_root_object.clone());

    if !spec.custom_error_responses.is_empty() {
        let mut responses = CustomErrorResponses::builder()
            .quantity(spec.custom_error_responses.len() as i32);
        for rewrite in &spec.custom_error_responses {
            responses = responses.items(
                CustomErrorResponse::builder()
                    .error_code(rewrite.error_code)
                    .response_code(&rewrite.response_code)
                    .response_page_path(&rewrite.response_page_path)
                    .error_caching_min_ttl(rewrite.caching_min_ttl)
                    .build()
                    .map_err(invalid_config)?,
            );
        }
        builder = builder.custom_error_responses(responses.build().map_err(invalid_config)?);
    }

    builder.build().map_err(invalid_config)
}

#[async_trait]
impl CdnService for CdnClient {
    async fn create_origin_access_control(&self, name: &str) -> Result<String> {
        let config = OriginAccessControlConfig::builder()
            .name(name)
            .origin_access_control_origin_type(OriginAccessControlOriginTypes::S3)
            .signing_behavior(OriginAccessControlSigningBehaviors::Always)
            .signing_protocol(OriginAccessControlSigningProtocols::Sigv4)
            .build()
            .map_err(invalid_config)?;

        let response = self
            .client
            .create_origin_access_control()
            .origin_access_control_config(config)
            .send()
            .await
            .map_err(|e| Error::Cdn(format!("Failed to create origin access control: {}", e)))?;

        let oac = response.origin_access_control().ok_or_else(|| {
            Error::Cdn("Origin access control missing from response".to_string())
        })?;

        Ok(oac.id().to_string())
    }

    async fn create_distribution(&self, spec: &DistributionSpec) -> Result<CreatedDistribution> {
        let config = to_distribution_config(spec)?;

        let response = self
            .client
            .create_distribution()
            .distribution_config(config)
            .send()
            .await
            .map_err(|e| Error::Cdn(format!("Failed to create distribution: {}", e)))?;

        let distribution = response
            .distribution()
            .ok_or_else(|| Error::Cdn("Distribution missing from response".to_string()))?;

        Ok(CreatedDistribution {
            id: distribution.id().to_string(),
            domain_name: distribution.domain_name().to_string(),
        })
    }
}
