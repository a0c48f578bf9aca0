//! Credential handling for gitseed
//!
//! This crate resolves the username/token pair used for the first HTTPS push:
//! - **Stores**: the OS keyring through `secret-tool`, or an in-memory store
//! - **Prompting**: a [`CredentialPrompt`] seam implemented by the CLI
//! - **Security**: tokens are held in a zeroizing [`SecureString`] and never logged

pub mod error;
pub mod prompt;
pub mod resolver;
pub mod security;
pub mod stores;

pub use error::{Error, Result};
pub use prompt::CredentialPrompt;
pub use resolver::{CredentialPair, CredentialResolver, CredentialSource};
pub use security::SecureString;
pub use stores::{MemoryStore, SecretStore, SecretToolStore};
