use super::ObjectStorage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One recorded `put_object` call.
#[derive(Debug, Clone)]
pub struct UploadedObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    pub cache_control: String,
}

#[derive(Default)]
struct MockState {
    buckets: HashMap<String, String>,
    public_access_blocked: Vec<String>,
    objects: Vec<UploadedObject>,
    policies: HashMap<String, String>,
}

/// In-memory [`ObjectStorage`] that records every request.
#[derive(Clone, Default)]
pub struct MockStorageClient {
    state: Arc<Mutex<MockState>>,
    fail_create_bucket: bool,
    fail_put_object_at: Option<usize>,
    fail_put_bucket_policy: bool,
}

impl MockStorageClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_bucket_failure(mut self) -> Self {
        self.fail_create_bucket = true;
        self
    }

    /// Fail the nth `put_object` call (zero-based).
    pub fn with_put_object_failure_at(mut self, index: usize) -> Self {
        self.fail_put_object_at = Some(index);
        self
    }

    pub fn with_put_bucket_policy_failure(mut self) -> Self {
        self.fail_put_bucket_policy = true;
        self
    }

    /// Region recorded for a created bucket, if any.
    pub fn bucket_region(&self, bucket: &str) -> Option<String> {
        self.state.lock().unwrap().buckets.get(bucket).cloned()
    }

    pub fn is_public_access_blocked(&self, bucket: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .public_access_blocked
            .iter()
            .any(|b| b == bucket)
    }

    pub fn uploaded_objects(&self) -> Vec<UploadedObject> {
        self.state.lock().unwrap().objects.clone()
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .map(|o| o.key.clone())
            .collect()
    }

    pub fn policy_for(&self, bucket: &str) -> Option<String> {
        self.state.lock().unwrap().policies.get(bucket).cloned()
    }
}

#[async_trait]
impl ObjectStorage for MockStorageClient {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()> {
        if self.fail_create_bucket {
            return Err(Error::Storage("Failed to create bucket: mock".to_string()));
        }
        self.state
            .lock()
            .unwrap()
            .buckets
            .insert(bucket.to_string(), region.to_string());
        Ok(())
    }

    async fn block_public_access(&self, bucket: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .public_access_blocked
            .push(bucket.to_string());
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if self.fail_put_object_at == Some(state.objects.len()) {
            return Err(Error::Storage(format!(
                "Failed to upload file {}: mock",
                key
            )));
        }
        state.objects.push(UploadedObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
            cache_control: cache_control.to_string(),
        });
        Ok(())
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<()> {
        if self.fail_put_bucket_policy {
            return Err(Error::Storage(
                "Failed to attach bucket policy: mock".to_string(),
            ));
        }
        self.state
            .lock()
            .unwrap()
            .policies
            .insert(bucket.to_string(), policy.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_bucket_and_objects() {
        let storage = MockStorageClient::new();

        storage.create_bucket("site", "eu-west-1").await.unwrap();
        storage.block_public_access("site").await.unwrap();
        storage
            .put_object("site", "index.html", b"<html>".to_vec(), "text/html", "no-cache")
            .await
            .unwrap();

        assert_eq!(storage.bucket_region("site").as_deref(), Some("eu-west-1"));
        assert!(storage.is_public_access_blocked("site"));
        assert_eq!(storage.uploaded_keys(), vec!["index.html"]);

        let object = &storage.uploaded_objects()[0];
        assert_eq!(object.content_type, "text/html");
        assert_eq!(object.cache_control, "no-cache");
    }

    #[tokio::test]
    async fn test_mock_put_object_failure_at_index() {
        let storage = MockStorageClient::new().with_put_object_failure_at(1);

        storage
            .put_object("site", "a.txt", vec![], "text/plain", "c")
            .await
            .unwrap();
        let err = storage
            .put_object("site", "b.txt", vec![], "text/plain", "c")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("b.txt"));
        assert_eq!(storage.uploaded_keys(), vec!["a.txt"]);
    }
}
