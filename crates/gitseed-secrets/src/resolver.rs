//! Credential resolution for a remote host
//!
//! Stored credentials win; the operator is only prompted when the store is
//! unavailable or is missing either value. Freshly entered credentials are
//! written back to the store, and a failed write only produces a warning.

use crate::error::{Error, Result};
use crate::prompt::CredentialPrompt;
use crate::security::SecureString;
use crate::stores::SecretStore;
use gitseed_core::types::SecretStoreConfig;
use tracing::{debug, info, warn};

/// Where a credential pair came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Both values were already in the secret store
    SecretStore,
    /// Entered interactively; `persisted` tells whether write-back succeeded
    Prompt { persisted: bool },
}

/// Username and token for one host
#[derive(Debug, Clone)]
pub struct CredentialPair {
    pub username: String,
    pub token: SecureString,
    pub source: CredentialSource,
}

/// Resolves credentials for a host against an optional store and a prompt
pub struct CredentialResolver<'a> {
    store: Option<&'a dyn SecretStore>,
    prompt: &'a dyn CredentialPrompt,
    config: SecretStoreConfig,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(
        store: Option<&'a dyn SecretStore>,
        prompt: &'a dyn CredentialPrompt,
        config: SecretStoreConfig,
    ) -> Self {
        Self {
            store,
            prompt,
            config,
        }
    }

    /// Resolve a username/token pair for `host`
    ///
    /// # Errors
    /// Returns [`Error::MissingCredential`] if the operator enters an empty
    /// username or token.
    pub async fn resolve(&self, host: &str) -> Result<CredentialPair> {
        if let Some(store) = self.store {
            if let Some((username, token)) = self.lookup_pair(store, host).await {
                info!("Using stored credentials for {}", host);
                return Ok(CredentialPair {
                    username,
                    token,
                    source: CredentialSource::SecretStore,
                });
            }
        }

        let username = self.prompt.username(host)?.trim().to_string();
        if username.is_empty() {
            return Err(Error::missing_credential("username", host));
        }

        let token = self.prompt.token(host)?;
        if token.as_str().trim().is_empty() {
            return Err(Error::missing_credential("token", host));
        }

        let persisted = match self.store {
            Some(store) => self.persist(store, host, &username, &token).await,
            None => false,
        };

        Ok(CredentialPair {
            username,
            token,
            source: CredentialSource::Prompt { persisted },
        })
    }

    async fn lookup_pair(
        &self,
        store: &dyn SecretStore,
        host: &str,
    ) -> Option<(String, SecureString)> {
        let username = match store.lookup(&self.config.username_key, host).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read username from {}: {}", store.name(), e);
                return None;
            }
        };
        let token = match store.lookup(&self.config.token_key, host).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read token from {}: {}", store.name(), e);
                return None;
            }
        };

        match (username, token) {
            (Some(username), Some(token))
                if !username.as_str().trim().is_empty() && !token.as_str().trim().is_empty() =>
            {
                Some((username.as_str().trim().to_string(), token))
            }
            _ => {
                debug!("No complete credential pair stored for {}", host);
                None
            }
        }
    }

    async fn persist(
        &self,
        store: &dyn SecretStore,
        host: &str,
        username: &str,
        token: &SecureString,
    ) -> bool {
        let entries = [
            (&self.config.username_key, SecureString::from(username)),
            (&self.config.token_key, token.clone()),
        ];

        for (key, value) in &entries {
            let label = format!("{} {} for {}", self.config.label_prefix, key, host);
            if let Err(e) = store.store(&label, key, host, value).await {
                warn!("Could not save {} to {}: {}", key, store.name(), e);
                return false;
            }
        }

        info!("Saved credentials for {} to {}", host, store.name());
        true
    }
}
