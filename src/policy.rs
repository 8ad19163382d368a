//! Least-privilege bucket policy construction
//!
//! With public access blocked at creation time, this policy is the only
//! read path into the bucket: CloudFront may fetch objects, and only on
//! behalf of one specific distribution.

use serde_json::json;

/// Build the bucket policy allowing `s3:GetObject` to the CloudFront
/// service principal, conditioned on the request originating from the
/// distribution identified by `account_id` and `distribution_id`.
pub fn build_bucket_policy(bucket: &str, account_id: &str, distribution_id: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": {
                "Service": "cloudfront.amazonaws.com"
            },
            "Action": "s3:GetObject",
            "Resource": format!("arn:aws:s3:::{}/*", bucket),
            "Condition": {
                "StringEquals": {
                    "AWS:SourceArn": format!(
                        "arn:aws:cloudfront::{}:distribution/{}",
                        account_id, distribution_id
                    )
                }
            }
        }]
    })
    .to_string()
}
