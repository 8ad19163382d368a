//! Application orchestration for one deployment run.

use crate::cdn::{CdnClient, CdnService};
use crate::distribution;
use crate::identity::{IdentityClient, IdentityService};
use crate::models::{DeploymentConfig, DeploymentSummary, ProvisionedResources};
use crate::policy;
use crate::storage::{ObjectStorage, StorageClient};
use crate::upload;
use crate::{Error, Result};
use aws_config::{BehaviorVersion, Region};
use std::path::Path;
use tracing::info;

/// Sequences the provisioning steps: bucket, upload, origin access control,
/// distribution, bucket policy. Strictly in order, no retries, no cleanup
/// of resources created before a failure.
pub struct App {
    config: DeploymentConfig,
    storage: Box<dyn ObjectStorage>,
    cdn: Box<dyn CdnService>,
    identity: Box<dyn IdentityService>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub storage: Box<dyn ObjectStorage>,
    pub cdn: Box<dyn CdnService>,
    pub identity: Box<dyn IdentityService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(config: DeploymentConfig, services: AppServices) -> Self {
        Self {
            config,
            storage: services.storage,
            cdn: services.cdn,
            identity: services.identity,
        }
    }

    /// Construct an app backed by real AWS clients sharing one SDK config
    /// honoring the target region and optional credential profile.
    pub async fn new(config: DeploymentConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        Ok(Self::with_services(
            config,
            AppServices {
                storage: Box::new(StorageClient::new(&sdk_config)),
                cdn: Box::new(CdnClient::new(&sdk_config)),
                identity: Box::new(IdentityClient::new(&sdk_config)),
            },
        ))
    }

    /// Run the full deployment and return the summary of what was created.
    ///
    /// The first failing step aborts the run; its error names the step.
    /// Resources created by earlier steps are left in place.
    pub async fn run(&self) -> Result<DeploymentSummary> {
        let mut resources = ProvisionedResources::default();
        let file_count = self.execute(&mut resources).await?;

        let summary = DeploymentSummary {
            bucket: self.config.bucket.clone(),
            distribution_id: resources
                .distribution_id
                .clone()
                .expect("distribution id recorded before execute returns"),
            distribution_domain: resources
                .distribution_domain
                .clone()
                .expect("distribution domain recorded before execute returns"),
        };

        info!("Deployment completed successfully ({} files)", file_count);
        info!("Bucket Name: {}", summary.bucket);
        info!("Distribution ID: {}", summary.distribution_id);
        info!(
            "Distribution Domain Name: https://{}",
            summary.distribution_domain
        );
        info!("It may take up to 15 minutes for the distribution to be fully deployed");

        Ok(summary)
    }

    async fn execute(&self, resources: &mut ProvisionedResources) -> Result<usize> {
        let config = &self.config;
        config.validate()?;

        info!(
            "Deploying '{}' from {} to {} ({:?} mode)",
            config.bucket, config.source_dir, config.region, config.mode
        );

        info!("Creating S3 bucket '{}'", config.bucket);
        self.storage
            .create_bucket(&config.bucket, &config.region)
            .await
            .map_err(|e| Error::step("create bucket", e))?;
        self.storage
            .block_public_access(&config.bucket)
            .await
            .map_err(|e| Error::step("block public access", e))?;
        info!("S3 bucket created with public access blocked");

        info!("Uploading website files");
        let file_count =
            upload::upload_dir(self.storage.as_ref(), &config.bucket, Path::new(&config.source_dir))
                .await
                .map_err(|e| Error::step("upload site files", e))?;

        info!("Creating origin access control");
        let oac_name = format!("{}-origin-access-control", config.bucket);
        let oac_id = self
            .cdn
            .create_origin_access_control(&oac_name)
            .await
            .map_err(|e| Error::step("create origin access control", e))?;
        resources.origin_access_control_id = Some(oac_id.clone());

        info!("Creating CloudFront distribution");
        let spec = distribution::build_spec(
            &config.bucket,
            &config.region,
            &config.description,
            config.mode,
            &oac_id,
        );
        let created = self
            .cdn
            .create_distribution(&spec)
            .await
            .map_err(|e| Error::step("create distribution", e))?;
        resources.distribution_id = Some(created.id.clone());
        resources.distribution_domain = Some(created.domain_name.clone());

        info!("Attaching bucket policy");
        let account_id = self
            .identity
            .caller_account_id()
            .await
            .map_err(|e| Error::step("resolve account id", e))?;
        resources.account_id = Some(account_id.clone());

        let policy = policy::build_bucket_policy(&config.bucket, &account_id, &created.id);
        self.storage
            .put_bucket_policy(&config.bucket, &policy)
            .await
            .map_err(|e| Error::step("attach bucket policy", e))?;
        info!("Bucket policy attached");

        Ok(file_count)
    }
}
