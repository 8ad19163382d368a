//! Data models and structures
//!
//! Defines the deployment configuration, the resources accumulated during a
//! run, and the crate-owned distribution specification handed to the CDN
//! client.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the distribution should treat missing paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteMode {
    /// Plain multi-page site: missing paths are real 404s.
    Basic,
    /// Single-page application: 403/404 rewritten to the entry page so the
    /// client router can handle the path.
    Spa,
}

/// Immutable configuration for one deployment run.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub mode: SiteMode,
    pub bucket: String,
    pub source_dir: String,
    pub description: String,
    pub region: String,
    pub profile: Option<String>,
}

impl DeploymentConfig {
    /// Validate the bucket name before any remote call is made.
    ///
    /// S3 bucket names must be DNS-compatible: 3-63 characters, lowercase
    /// letters, digits, dots and hyphens, starting and ending alphanumeric.
    pub fn validate(&self) -> Result<()> {
        let name = &self.bucket;
        if name.len() < 3 || name.len() > 63 {
            return Err(Error::Config(format!(
                "bucket name '{}' must be between 3 and 63 characters",
                name
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        {
            return Err(Error::Config(format!(
                "bucket name '{}' may only contain lowercase letters, digits, dots and hyphens",
                name
            )));
        }
        let first = name.chars().next().unwrap_or('-');
        let last = name.chars().last().unwrap_or('-');
        if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
            return Err(Error::Config(format!(
                "bucket name '{}' must start and end with a letter or digit",
                name
            )));
        }
        Ok(())
    }
}

/// Resources created as a run advances. Each field is written exactly once.
#[derive(Debug, Clone, Default)]
pub struct ProvisionedResources {
    pub origin_access_control_id: Option<String>,
    pub distribution_id: Option<String>,
    pub distribution_domain: Option<String>,
    pub account_id: Option<String>,
}

/// Final report of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentSummary {
    pub bucket: String,
    pub distribution_id: String,
    pub distribution_domain: String,
}

/// A 4xx response rewritten by the distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRewrite {
    pub error_code: i32,
    pub response_code: String,
    pub response_page_path: String,
    pub caching_min_ttl: i64,
}

/// Distribution specification built by [`crate::distribution::build_spec`]
/// and translated into CloudFront API types by the CDN client.
///
/// Viewer protocol policy is not a field: it is always redirect-to-HTTPS and
/// fixed at the translation layer.
#[derive(Debug, Clone)]
pub struct DistributionSpec {
    pub caller_reference: String,
    pub comment: String,
    pub origin_id: String,
    pub origin_domain: String,
    pub origin_access_control_id: String,
    pub default_root_object: Option<String>,
    pub custom_error_responses: Vec<ErrorRewrite>,
    pub cache_policy_id: String,
    pub enabled: bool,
    pub ipv6_enabled: bool,
    pub compress: bool,
}

/// Result of creating a distribution.
#[derive(Debug, Clone)]
pub struct CreatedDistribution {
    pub id: String,
    pub domain_name: String,
}
