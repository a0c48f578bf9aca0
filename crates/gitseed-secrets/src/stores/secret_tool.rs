//! libsecret backend driven through the `secret-tool` binary

use crate::error::{Error, Result};
use crate::security::SecureString;
use crate::stores::SecretStore;
use async_trait::async_trait;
use gitseed_core::types::SecretStoreConfig;
use gitseed_projects::ExternalCommand;
use std::path::PathBuf;
use tracing::debug;

/// Store backed by `secret-tool lookup` / `secret-tool store`
#[derive(Debug, Clone)]
pub struct SecretToolStore {
    program: PathBuf,
}

impl SecretToolStore {
    /// Locate the configured binary on PATH
    ///
    /// Returns `None` when it is not installed; callers continue prompt-only.
    pub fn detect(config: &SecretStoreConfig) -> Option<Self> {
        match which::which(&config.program) {
            Ok(program) => {
                debug!("Using secret store at {}", program.display());
                Some(Self { program })
            }
            Err(e) => {
                debug!("Secret store '{}' not found: {}", config.program, e);
                None
            }
        }
    }

    /// Use the binary at `program` without a PATH lookup
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> ExternalCommand {
        ExternalCommand::new(self.program.to_string_lossy())
    }
}

#[async_trait]
impl SecretStore for SecretToolStore {
    async fn lookup(&self, key: &str, host: &str) -> Result<Option<SecureString>> {
        let output = self
            .command()
            .args(["lookup", "key", key, "host", host])
            .run()
            .await?;

        // exit 1 with empty output means no matching item
        if !output.success() {
            if output.stderr.trim().is_empty() {
                return Ok(None);
            }
            return Err(Error::store_failed("lookup", output.stderr.trim()));
        }

        let value = SecureString::new(output.stdout).trim_line_ending();
        Ok((!value.is_empty()).then_some(value))
    }

    async fn store(&self, label: &str, key: &str, host: &str, value: &SecureString) -> Result<()> {
        let output = self
            .command()
            .args([
                "store".to_string(),
                format!("--label={}", label),
                "key".to_string(),
                key.to_string(),
                "host".to_string(),
                host.to_string(),
            ])
            .stdin_bytes(value.as_str())
            .run()
            .await?;

        if !output.success() {
            return Err(Error::store_failed("store", output.error_message()));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "secret-tool"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    // Minimal stand-in that keeps one file per (key, host)
    const FAKE_SECRET_TOOL: &str = r#"#!/bin/sh
dir="$(dirname "$0")/items"
mkdir -p "$dir"
case "$1" in
  lookup)
    f="$dir/$3@$5"
    [ -f "$f" ] || exit 1
    cat "$f"
    ;;
  store)
    cat > "$dir/$4@$6"
    ;;
  *)
    echo "unknown command $1" >&2
    exit 2
    ;;
esac
"#;

    fn fake_store(temp_dir: &TempDir) -> SecretToolStore {
        let path = temp_dir.path().join("secret-tool");
        std::fs::write(&path, FAKE_SECRET_TOOL).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        SecretToolStore::with_program(path)
    }

    #[tokio::test]
    async fn test_store_then_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let store = fake_store(&temp_dir);

        assert!(store
            .lookup("git-token", "github.com")
            .await
            .unwrap()
            .is_none());

        store
            .store(
                "gitseed git-token for github.com",
                "git-token",
                "github.com",
                &SecureString::from("ghp_123"),
            )
            .await
            .unwrap();

        let value = store.lookup("git-token", "github.com").await.unwrap().unwrap();
        assert_eq!(value.as_str(), "ghp_123");
        assert!(store
            .lookup("git-token", "gitlab.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_detect_missing_program() {
        let config = SecretStoreConfig {
            program: "gitseed-no-such-secret-tool".to_string(),
            ..Default::default()
        };
        assert!(SecretToolStore::detect(&config).is_none());
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let store = SecretToolStore::with_program("/nonexistent/secret-tool");
        let result = store.lookup("git-token", "github.com").await;
        assert!(matches!(result, Err(Error::Process(_))));
    }
}
