//! CloudFront distribution specification
//!
//! Builds the crate-owned [`DistributionSpec`] for a deployment, branching
//! on site mode. The CDN client translates the spec into CloudFront API
//! types when the distribution is created.

use crate::models::{DistributionSpec, ErrorRewrite, SiteMode};
use chrono::Utc;

/// Managed "CachingOptimized" cache policy.
pub const CACHE_POLICY_ID: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

pub const DEFAULT_ROOT_OBJECT: &str = "index.html";

const ORIGIN_ID: &str = "S3Origin";

/// Entry page served in place of 403/404 responses in SPA mode.
const SPA_FALLBACK_PAGE: &str = "/index.html";

/// How long CloudFront may cache a rewritten error response.
const ERROR_CACHING_MIN_TTL_SECS: i64 = 15;

/// Build the distribution specification for `bucket` in `region`.
///
/// Both modes serve `index.html` at the root. SPA mode additionally
/// rewrites 403 and 404 to the entry page with a synthesized 200 so
/// client-side routes resolve.
pub fn build_spec(
    bucket: &str,
    region: &str,
    description: &str,
    mode: SiteMode,
    origin_access_control_id: &str,
) -> DistributionSpec {
    let custom_error_responses = match mode {
        SiteMode::Basic => Vec::new(),
        SiteMode::Spa => vec![
            ErrorRewrite {
                error_code: 403,
                response_code: "200".to_string(),
                response_page_path: SPA_FALLBACK_PAGE.to_string(),
                caching_min_ttl: ERROR_CACHING_MIN_TTL_SECS,
            },
            ErrorRewrite {
                error_code: 404,
                response_code: "200".to_string(),
                response_page_path: SPA_FALLBACK_PAGE.to_string(),
                caching_min_ttl: ERROR_CACHING_MIN_TTL_SECS,
            },
        ],
    };

    DistributionSpec {
        // The create call treats the caller reference as an idempotency key.
        caller_reference: format!("cli-{}", Utc::now().timestamp()),
        comment: description.to_string(),
        origin_id: ORIGIN_ID.to_string(),
        origin_domain: format!("{}.s3.{}.amazonaws.com", bucket, region),
        origin_access_control_id: origin_access_control_id.to_string(),
        default_root_object: Some(DEFAULT_ROOT_OBJECT.to_string()),
        custom_error_responses,
        cache_policy_id: CACHE_POLICY_ID.to_string(),
        enabled: true,
        ipv6_enabled: true,
        compress: true,
    }
}
