//! Git configuration management

use crate::error::{Error, Result};
use crate::process::ExternalCommand;
use crate::types::GitIdentity;
use camino::Utf8Path;
use tracing::{debug, info};

/// Git configuration scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// Local repository config (.git/config)
    Local,
    /// Global user config (~/.gitconfig)
    Global,
}

impl ConfigScope {
    fn as_arg(&self) -> &str {
        match self {
            Self::Local => "--local",
            Self::Global => "--global",
        }
    }
}

fn config_command(path: Option<&Utf8Path>) -> ExternalCommand {
    let cmd = ExternalCommand::new("git");
    match path {
        Some(p) => cmd.current_dir(p),
        None => cmd,
    }
}

/// Set a git configuration value
///
/// # Arguments
/// * `path` - Repository path (only used for local scope)
/// * `key` - Configuration key (e.g., "user.name")
/// * `value` - Configuration value
/// * `scope` - Configuration scope
pub async fn set_config_value(
    path: Option<&Utf8Path>,
    key: &str,
    value: &str,
    scope: ConfigScope,
) -> Result<()> {
    debug!("Setting git config: {} = {}", key, value);

    let path = if scope == ConfigScope::Local { path } else { None };
    let output = config_command(path)
        .args(["config", scope.as_arg(), key, value])
        .run()
        .await?;

    if !output.success() {
        return Err(Error::invalid_config(format!(
            "Failed to set {}: {}",
            key,
            output.error_message()
        )));
    }

    Ok(())
}

/// Get a git configuration value
///
/// Without a scope, the effective value (local over global over system) is
/// returned.
///
/// # Returns
/// The configuration value if set, None otherwise
pub async fn get_config_value(
    path: Option<&Utf8Path>,
    key: &str,
    scope: Option<ConfigScope>,
) -> Result<Option<String>> {
    debug!("Getting git config: {}", key);

    let mut cmd = config_command(path).arg("config");
    if let Some(scope) = scope {
        cmd = cmd.arg(scope.as_arg());
    }
    let output = cmd.arg(key).run().await?;

    // `git config <key>` exits 1 when the key is unset
    match output.code {
        Some(0) => {
            let value = output.stdout_trimmed();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Some(1) => Ok(None),
        _ => Err(Error::invalid_config(format!(
            "Failed to read {}: {}",
            key,
            output.error_message()
        ))),
    }
}

/// Effective commit identity for the repository, if both parts are set
pub async fn read_identity(path: &Utf8Path) -> Result<Option<GitIdentity>> {
    let name = get_config_value(Some(path), "user.name", None).await?;
    let email = get_config_value(Some(path), "user.email", None).await?;

    Ok(match (name, email) {
        (Some(name), Some(email)) => Some(GitIdentity::new(name, email)),
        _ => None,
    })
}

/// Write a commit identity into the repository's local config
pub async fn configure_identity(path: &Utf8Path, identity: &GitIdentity) -> Result<()> {
    identity.validate()?;
    info!("Configuring git user information");

    set_config_value(Some(path), "user.name", &identity.name, ConfigScope::Local).await?;
    set_config_value(Some(path), "user.email", &identity.email, ConfigScope::Local).await?;

    info!("Git user set to: {} <{}>", identity.name, identity.email);
    Ok(())
}

/// Set the global credential helper (`git config --global credential.helper`)
pub async fn set_credential_helper(helper: &str) -> Result<()> {
    if helper.trim().is_empty() {
        return Err(Error::invalid_config("credential helper cannot be empty"));
    }

    info!("Setting global credential helper: {}", helper);
    set_config_value(None, "credential.helper", helper, ConfigScope::Global).await
}
