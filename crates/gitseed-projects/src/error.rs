//! Error types for gitseed-projects

use thiserror::Error;

/// Result type alias using gitseed-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project bootstrap error types
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown project type
    #[error("Unknown project type: {project_type}. Available types: {available}")]
    UnknownProjectType {
        project_type: String,
        available: String,
    },

    /// Template catalog does not match the project type enumeration
    #[error("Invalid gitignore template catalog: {message}")]
    InvalidCatalog { message: String },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Invalid repository URL
    #[error("Invalid repository URL: {url}. Expected https://host/path.git, git@host:path.git or ssh://git@host/path.git")]
    InvalidRepoUrl { url: String },

    /// Target directory cannot be used
    #[error("Invalid target directory {path}: {reason}")]
    InvalidDirectory { path: String, reason: String },

    /// Repository already exists
    #[error("Repository already exists at: {path}")]
    RepoExists { path: String },

    /// Invalid branch name
    #[error("Invalid branch name: '{branch}'")]
    InvalidBranch { branch: String },

    /// Remote already exists
    #[error("Remote '{remote}' already exists")]
    RemoteExists { remote: String },

    /// Push failed
    #[error("Failed to push to '{remote}': {message}")]
    PushFailed { remote: String, message: String },

    /// Invalid git config
    #[error("Invalid git config: {message}")]
    InvalidConfig { message: String },

    /// Git user configuration invalid
    #[error("Git user configuration invalid: {message}")]
    InvalidGitConfig { message: String },

    /// Process execution error
    #[error("Process execution failed: {0}")]
    ProcessExecution(String),

    /// Command not found
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Glob pattern error
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unknown project type error
    pub fn unknown_project_type(
        project_type: impl Into<String>,
        available: impl Into<String>,
    ) -> Self {
        Self::UnknownProjectType {
            project_type: project_type.into(),
            available: available.into(),
        }
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create an invalid repo URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    /// Create an invalid directory error
    pub fn invalid_directory(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDirectory {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a repo exists error
    pub fn repo_exists(path: impl Into<String>) -> Self {
        Self::RepoExists { path: path.into() }
    }

    /// Create an invalid branch error
    pub fn invalid_branch(branch: impl Into<String>) -> Self {
        Self::InvalidBranch {
            branch: branch.into(),
        }
    }

    /// Create a remote exists error
    pub fn remote_exists(remote: impl Into<String>) -> Self {
        Self::RemoteExists {
            remote: remote.into(),
        }
    }

    /// Create a push failed error
    pub fn push_failed(remote: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PushFailed {
            remote: remote.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid git config error
    pub fn invalid_git_config(message: impl Into<String>) -> Self {
        Self::InvalidGitConfig {
            message: message.into(),
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }
}
