use pretty_assertions::assert_eq;
use static_site_deploy::{
    app::{App, AppServices},
    cdn::MockCdnClient,
    distribution,
    identity::MockIdentityClient,
    models::{DeploymentConfig, SiteMode},
    policy,
    storage::MockStorageClient,
    upload,
};
use std::fs;
use tempfile::TempDir;

fn site_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<html><body>hi</body></html>").unwrap();
    fs::write(dir.path().join("styles.css"), "body { margin: 0 }").unwrap();
    fs::create_dir_all(dir.path().join("img")).unwrap();
    fs::write(dir.path().join("img").join("logo.svg"), "<svg/>").unwrap();
    dir
}

fn config_for(site: &TempDir, mode: SiteMode) -> DeploymentConfig {
    DeploymentConfig {
        mode,
        bucket: "example-site".to_string(),
        source_dir: site.path().to_string_lossy().to_string(),
        description: "example distribution".to_string(),
        region: "us-east-1".to_string(),
        profile: None,
    }
}

#[tokio::test]
async fn test_full_deployment_with_mocks() {
    let site = site_fixture();
    let storage = MockStorageClient::new();
    let cdn = MockCdnClient::new()
        .with_oac_id("OAC777".to_string())
        .with_distribution("E7EXAMPLE".to_string(), "d777.cloudfront.net".to_string());
    let identity = MockIdentityClient::new().with_account_id("999988887777".to_string());

    let app = App::with_services(
        config_for(&site, SiteMode::Basic),
        AppServices {
            storage: Box::new(storage.clone()),
            cdn: Box::new(cdn.clone()),
            identity: Box::new(identity.clone()),
        },
    );

    let summary = app.run().await.unwrap();
    assert_eq!(summary.bucket, "example-site");
    assert_eq!(summary.distribution_id, "E7EXAMPLE");
    assert_eq!(summary.distribution_domain, "d777.cloudfront.net");

    // All three files uploaded with web content types and the one-year
    // cache directive.
    let objects = storage.uploaded_objects();
    assert_eq!(objects.len(), 3);
    assert!(objects
        .iter()
        .all(|o| o.cache_control == upload::CACHE_CONTROL));
    let svg = objects.iter().find(|o| o.key == "img/logo.svg").unwrap();
    assert_eq!(svg.content_type, "image/svg+xml");

    // Basic mode: root object set, no error rewrites.
    let spec = &cdn.created_distribution_specs()[0];
    assert_eq!(spec.default_root_object.as_deref(), Some("index.html"));
    assert!(spec.custom_error_responses.is_empty());
    assert_eq!(spec.origin_access_control_id, "OAC777");
    assert_eq!(spec.cache_policy_id, distribution::CACHE_POLICY_ID);

    // Policy matches the builder output for the resolved ids exactly.
    let expected = policy::build_bucket_policy("example-site", "999988887777", "E7EXAMPLE");
    assert_eq!(storage.policy_for("example-site").unwrap(), expected);
}

#[tokio::test]
async fn test_spa_deployment_configures_routing_fallback() {
    let site = site_fixture();
    let storage = MockStorageClient::new();
    let cdn = MockCdnClient::new();

    let app = App::with_services(
        config_for(&site, SiteMode::Spa),
        AppServices {
            storage: Box::new(storage),
            cdn: Box::new(cdn.clone()),
            identity: Box::new(MockIdentityClient::new()),
        },
    );

    app.run().await.unwrap();

    let spec = &cdn.created_distribution_specs()[0];
    assert_eq!(spec.default_root_object.as_deref(), Some("index.html"));

    let codes: Vec<i32> = spec
        .custom_error_responses
        .iter()
        .map(|r| r.error_code)
        .collect();
    assert_eq!(codes, vec![403, 404]);
    assert!(spec
        .custom_error_responses
        .iter()
        .all(|r| r.response_page_path == "/index.html" && r.response_code == "200"));
}

#[tokio::test]
async fn test_identity_failure_aborts_before_policy_attachment() {
    let site = site_fixture();
    let storage = MockStorageClient::new();

    let app = App::with_services(
        config_for(&site, SiteMode::Basic),
        AppServices {
            storage: Box::new(storage.clone()),
            cdn: Box::new(MockCdnClient::new()),
            identity: Box::new(MockIdentityClient::new().with_failure()),
        },
    );

    let err = app.run().await.unwrap_err();
    assert_eq!(err.step_name(), Some("resolve account id"));

    // The distribution already exists by then, but no policy was attached.
    assert!(storage.policy_for("example-site").is_none());
}
