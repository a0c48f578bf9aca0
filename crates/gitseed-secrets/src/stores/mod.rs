//! Secret store trait and implementations

pub mod memory;
pub mod secret_tool;

use crate::error::Result;
use crate::security::SecureString;
use async_trait::async_trait;

/// Trait for credential backends keyed by `(key, host)` attributes
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up the value stored under `key` for `host`
    ///
    /// Returns Ok(None) if nothing is stored.
    /// Returns Err if the store could not be queried.
    async fn lookup(&self, key: &str, host: &str) -> Result<Option<SecureString>>;

    /// Persist `value` under `key` for `host`, replacing any previous value
    async fn store(&self, label: &str, key: &str, host: &str, value: &SecureString) -> Result<()>;

    /// Store name for messages
    fn name(&self) -> &str;
}

pub use memory::MemoryStore;
pub use secret_tool::SecretToolStore;
