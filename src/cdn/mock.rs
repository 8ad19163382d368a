use super::CdnService;
use crate::models::{CreatedDistribution, DistributionSpec};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`CdnService`] that records every request.
#[derive(Clone)]
pub struct MockCdnClient {
    oac_names: Arc<Mutex<Vec<String>>>,
    distribution_specs: Arc<Mutex<Vec<DistributionSpec>>>,
    oac_id: String,
    distribution_id: String,
    distribution_domain: String,
    fail_create_distribution: bool,
}

impl MockCdnClient {
    pub fn new() -> Self {
        Self {
            oac_names: Arc::new(Mutex::new(Vec::new())),
            distribution_specs: Arc::new(Mutex::new(Vec::new())),
            oac_id: "OACMOCK".to_string(),
            distribution_id: "EMOCK123".to_string(),
            distribution_domain: "dmock123.cloudfront.net".to_string(),
            fail_create_distribution: false,
        }
    }

    pub fn with_oac_id(mut self, id: String) -> Self {
        self.oac_id = id;
        self
    }

    pub fn with_distribution(mut self, id: String, domain: String) -> Self {
        self.distribution_id = id;
        self.distribution_domain = domain;
        self
    }

    pub fn with_create_distribution_failure(mut self) -> Self {
        self.fail_create_distribution = true;
        self
    }

    pub fn created_oac_names(&self) -> Vec<String> {
        self.oac_names.lock().unwrap().clone()
    }

    pub fn created_distribution_specs(&self) -> Vec<DistributionSpec> {
        self.distribution_specs.lock().unwrap().clone()
    }
}

impl Default for MockCdnClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CdnService for MockCdnClient {
    async fn create_origin_access_control(&self, name: &str) -> Result<String> {
        self.oac_names.lock().unwrap().push(name.to_string());
        Ok(self.oac_id.clone())
    }

    async fn create_distribution(&self, spec: &DistributionSpec) -> Result<CreatedDistribution> {
        if self.fail_create_distribution {
            return Err(Error::Cdn("Failed to create distribution: mock".to_string()));
        }
        self.distribution_specs.lock().unwrap().push(spec.clone());
        Ok(CreatedDistribution {
            id: self.distribution_id.clone(),
            domain_name: self.distribution_domain.clone(),
        })
    }
}
