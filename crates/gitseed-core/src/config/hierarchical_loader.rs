//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.gitseed/config.yaml)
//! 3. Environment variables (GITSEED_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Name of the user configuration file inside the config directory
const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader rooted at ~/.gitseed
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the standard config directory (~/.gitseed)
    ///
    /// The directory is not created; a missing directory simply means no
    /// user overrides.
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = crate::utils::get_home_dir()
            .map_err(|e| Error::invalid_config(e.to_string()))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {:?}", p)))?;

        Ok(home.join(".gitseed"))
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        let user_config_path = self.config_dir.join(USER_CONFIG_FILE);
        if user_config_path.exists() {
            debug!("Loading user config from {}", user_config_path);
            let file_config = self.load_yaml_file::<RuntimeConfig>(&user_config_path)?;
            config = Self::merge_runtime_config(config, file_config);
        }

        config = self.apply_env_overrides(config)?;

        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Merge two runtime configs (base is overridden by overlay)
    fn merge_runtime_config(base: RuntimeConfig, overlay: RuntimeConfig) -> RuntimeConfig {
        let general_defaults = if overlay.gitignore.general_defaults.is_empty() {
            base.gitignore.general_defaults
        } else {
            overlay.gitignore.general_defaults
        };

        RuntimeConfig {
            git: overlay.git,
            gitignore: crate::types::GitignoreConfig { general_defaults },
            secrets: overlay.secrets,
            tutorial: overlay.tutorial,
        }
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Some(val) = required_env("GITSEED_DEFAULT_BRANCH")? {
            config.git.default_branch = val;
        }

        if let Some(val) = required_env("GITSEED_INITIAL_COMMIT_MESSAGE")? {
            config.git.initial_commit_message = val;
        }

        if let Some(val) = required_env("GITSEED_REMOTE_NAME")? {
            config.git.remote_name = val;
        }

        // An empty value disables the credential helper offer
        if let Ok(val) = env::var("GITSEED_CREDENTIAL_HELPER") {
            config.git.credential_helper = if val.trim().is_empty() {
                None
            } else {
                Some(val)
            };
        }

        if let Ok(val) = env::var("GITSEED_SECRET_TOOL") {
            config.secrets.program = val;
        }

        if let Ok(val) = env::var("GITSEED_CHEATSHEET_FILE") {
            config.tutorial.cheatsheet_file = val;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

/// Read an override that must not be blank when set
fn required_env(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(val) if val.trim().is_empty() => Err(Error::invalid_config(format!(
            "{} must not be empty",
            name
        ))),
        Ok(val) => Ok(Some(val)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (HierarchicalConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        let loader = HierarchicalConfigLoader::with_dir(config_dir);
        (loader, temp_dir)
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_defaults() {
        let (loader, _temp) = create_temp_loader();
        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.git.default_branch, "main");
        assert_eq!(config.git.initial_commit_message, "Initial commit");
        assert_eq!(config.secrets.program, "secret-tool");
        assert!(config
            .gitignore
            .general_defaults
            .contains(&"*.log".to_string()));
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_from_file() {
        let (loader, _temp) = create_temp_loader();

        let config_content = r#"
git:
  default-branch: trunk
  remote-name: upstream
secrets:
  label-prefix: work
"#;
        let config_path = loader.config_dir().join(USER_CONFIG_FILE);
        fs::write(&config_path, config_content).unwrap();

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.git.default_branch, "trunk");
        assert_eq!(config.git.remote_name, "upstream");
        assert_eq!(config.secrets.label_prefix, "work");
        assert_eq!(config.secrets.program, "secret-tool");
        // Section absent from the file keeps the embedded list
        assert!(!config.gitignore.general_defaults.is_empty());
    }

    #[test]
    #[serial]
    fn test_invalid_user_config() {
        let (loader, _temp) = create_temp_loader();
        let config_path = loader.config_dir().join(USER_CONFIG_FILE);
        fs::write(&config_path, "git: [not, a, map]").unwrap();

        let result = loader.load_runtime_config();
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("GITSEED_DEFAULT_BRANCH", "develop");
        env::set_var("GITSEED_CREDENTIAL_HELPER", "");
        env::set_var("GITSEED_SECRET_TOOL", "/opt/bin/secret-tool");

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.git.default_branch, "develop");
        assert!(config.git.credential_helper.is_none());
        assert_eq!(config.secrets.program, "/opt/bin/secret-tool");

        env::remove_var("GITSEED_DEFAULT_BRANCH");
        env::remove_var("GITSEED_CREDENTIAL_HELPER");
        env::remove_var("GITSEED_SECRET_TOOL");
    }

    #[test]
    #[serial]
    fn test_empty_branch_env_rejected() {
        let (loader, _temp) = create_temp_loader();

        for (var, value) in [
            ("GITSEED_DEFAULT_BRANCH", "  "),
            ("GITSEED_INITIAL_COMMIT_MESSAGE", "   "),
            ("GITSEED_REMOTE_NAME", ""),
        ] {
            env::set_var(var, value);
            let result = loader.load_runtime_config();
            env::remove_var(var);

            let err = result.unwrap_err();
            assert!(err.to_string().contains(var), "{}: {}", var, err);
        }
    }

    #[test]
    fn test_merge_runtime_config() {
        let base = RuntimeConfig::default();
        let mut overlay = RuntimeConfig::default();
        overlay.git.initial_commit_message = "chore: bootstrap".to_string();
        overlay.gitignore.general_defaults.clear();

        let merged = HierarchicalConfigLoader::merge_runtime_config(base, overlay);
        assert_eq!(merged.git.initial_commit_message, "chore: bootstrap");
        assert!(!merged.gitignore.general_defaults.is_empty());
    }
}
