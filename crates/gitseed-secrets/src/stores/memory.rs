//! In-process store, used when no OS keyring is wanted and in tests

use crate::error::{Error, Result};
use crate::security::SecureString;
use crate::stores::SecretStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<(String, String), SecureString>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value
    pub fn with_entry(mut self, key: &str, host: &str, value: &str) -> Self {
        self.items
            .get_mut()
            .insert((key.to_string(), host.to_string()), value.into());
        self
    }

    /// Reject every write
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Stored value, for assertions
    pub async fn get(&self, key: &str, host: &str) -> Option<SecureString> {
        self.items
            .lock()
            .await
            .get(&(key.to_string(), host.to_string()))
            .cloned()
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn lookup(&self, key: &str, host: &str) -> Result<Option<SecureString>> {
        Ok(self.get(key, host).await)
    }

    async fn store(&self, _label: &str, key: &str, host: &str, value: &SecureString) -> Result<()> {
        if self.read_only {
            return Err(Error::store_failed("store", "store is read-only"));
        }
        self.items
            .lock()
            .await
            .insert((key.to_string(), host.to_string()), value.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new().with_entry("git-username", "github.com", "octocat");
        assert_eq!(
            store
                .lookup("git-username", "github.com")
                .await
                .unwrap()
                .unwrap()
                .as_str(),
            "octocat"
        );

        store
            .store("label", "git-token", "github.com", &"t0k".into())
            .await
            .unwrap();
        assert!(store.get("git-token", "github.com").await.is_some());
    }

    #[tokio::test]
    async fn test_read_only_store_rejects_writes() {
        let store = MemoryStore::new().read_only();
        let result = store.store("label", "k", "h", &"v".into()).await;
        assert!(matches!(result, Err(Error::StoreFailed { .. })));
    }
}
