use super::IdentityService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// [`IdentityService`] returning a fixed account id.
#[derive(Clone)]
pub struct MockIdentityClient {
    account_id: String,
    fail: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockIdentityClient {
    pub fn new() -> Self {
        Self {
            account_id: "123456789012".to_string(),
            fail: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_account_id(mut self, account_id: String) -> Self {
        self.account_id = account_id;
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockIdentityClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityService for MockIdentityClient {
    async fn caller_account_id(&self) -> Result<String> {
        *self.call_count.lock().unwrap() += 1;
        if self.fail {
            return Err(Error::Identity("Failed to get user info: mock".to_string()));
        }
        Ok(self.account_id.clone())
    }
}
