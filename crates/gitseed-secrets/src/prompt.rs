//! Interactive credential entry seam

use crate::error::Result;
use crate::security::SecureString;

/// Source of operator-entered credentials
///
/// The CLI implements this with terminal prompts; tests substitute scripted
/// or panicking implementations.
pub trait CredentialPrompt {
    /// Ask for the username to use with `host`
    fn username(&self, host: &str) -> Result<String>;

    /// Ask for the token or password to use with `host`, without echo
    fn token(&self, host: &str) -> Result<SecureString>;
}
