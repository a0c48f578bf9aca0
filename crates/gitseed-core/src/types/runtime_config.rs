//! Runtime configuration types for operational parameters
//!
//! These types control how a repository is bootstrapped: git workflow
//! defaults, the general .gitignore entries, the secret store binary, and
//! the tutorial output.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Git workflow defaults
    #[serde(default)]
    pub git: GitWorkflowConfig,

    /// General .gitignore entries proposed for every project
    #[serde(default)]
    pub gitignore: GitignoreConfig,

    /// OS secret store settings
    #[serde(default)]
    pub secrets: SecretStoreConfig,

    /// Tutorial mode output
    #[serde(default)]
    pub tutorial: TutorialConfig,
}

/// Git workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitWorkflowConfig {
    /// Branch the initial branch is renamed to
    #[serde(default = "default_git_branch")]
    pub default_branch: String,

    /// Default initial commit message
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,

    /// Name of the remote created during remote setup
    #[serde(default = "default_remote_name")]
    pub remote_name: String,

    /// Credential helper offered for `git config --global credential.helper`
    #[serde(default = "default_credential_helper")]
    pub credential_helper: Option<String>,
}

impl Default for GitWorkflowConfig {
    fn default() -> Self {
        Self {
            default_branch: default_git_branch(),
            initial_commit_message: default_initial_commit_message(),
            remote_name: default_remote_name(),
            credential_helper: default_credential_helper(),
        }
    }
}

fn default_git_branch() -> String {
    "main".to_string()
}
fn default_initial_commit_message() -> String {
    "Initial commit".to_string()
}
fn default_remote_name() -> String {
    "origin".to_string()
}
fn default_credential_helper() -> Option<String> {
    Some("cache".to_string())
}

/// General .gitignore defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitignoreConfig {
    /// Entries proposed ahead of any project template
    #[serde(default = "default_general_entries")]
    pub general_defaults: Vec<String>,
}

impl Default for GitignoreConfig {
    fn default() -> Self {
        Self {
            general_defaults: default_general_entries(),
        }
    }
}

fn default_general_entries() -> Vec<String> {
    [
        ".DS_Store",
        "Thumbs.db",
        "*.log",
        "*.tmp",
        "*.swp",
        ".env",
        ".env.local",
        ".idea/",
        ".vscode/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Secret store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SecretStoreConfig {
    /// Secret store binary
    #[serde(default = "default_secret_program")]
    pub program: String,

    /// Prefix for the label shown in the keyring UI
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,

    /// Attribute value under which usernames are stored
    #[serde(default = "default_username_key")]
    pub username_key: String,

    /// Attribute value under which tokens are stored
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl Default for SecretStoreConfig {
    fn default() -> Self {
        Self {
            program: default_secret_program(),
            label_prefix: default_label_prefix(),
            username_key: default_username_key(),
            token_key: default_token_key(),
        }
    }
}

fn default_secret_program() -> String {
    "secret-tool".to_string()
}
fn default_label_prefix() -> String {
    "gitseed".to_string()
}
fn default_username_key() -> String {
    "git-username".to_string()
}
fn default_token_key() -> String {
    "git-token".to_string()
}

/// Tutorial mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TutorialConfig {
    /// File name of the generated cheat sheet, relative to the repository root
    #[serde(default = "default_cheatsheet_file")]
    pub cheatsheet_file: String,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            cheatsheet_file: default_cheatsheet_file(),
        }
    }
}

fn default_cheatsheet_file() -> String {
    "GIT_CHEATSHEET.md".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.git.default_branch, "main");
        assert_eq!(config.git.remote_name, "origin");
        assert_eq!(config.git.credential_helper.as_deref(), Some("cache"));
        assert_eq!(config.secrets.program, "secret-tool");
        assert_eq!(config.tutorial.cheatsheet_file, "GIT_CHEATSHEET.md");
        assert!(config
            .gitignore
            .general_defaults
            .contains(&".DS_Store".to_string()));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
git:
  default-branch: trunk
"#;
        let config: RuntimeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.git.default_branch, "trunk");
        assert_eq!(config.git.initial_commit_message, "Initial commit");
        assert_eq!(config.secrets.token_key, "git-token");
    }

    #[test]
    fn test_credential_helper_can_be_disabled() {
        let yaml = r#"
git:
  credential-helper: null
"#;
        let config: RuntimeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(config.git.credential_helper.is_none());
    }
}
