//! Git operations module
//!
//! Async wrappers over the `git` binary used while bootstrapping a repository:
//! - Repository initialization, staging and the initial commit
//! - Branch name validation and renaming
//! - Local/global configuration (identity, credential helper)
//! - Remote registration and the first upstream push
//! - Remote URL classification
//!
//! # Examples
//!
//! ```no_run
//! use gitseed_projects::git::{commit, init_repository, rename_branch, stage_all};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Utf8Path::new("/tmp/my-repo");
//! init_repository(path).await?;
//! stage_all(path).await?;
//! commit(path, "Initial commit").await?;
//! rename_branch(path, "main").await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod init;
mod remote;
mod url;

use crate::process::ExternalCommand;
use camino::Utf8Path;

// Re-export public API
pub use config::{
    configure_identity, get_config_value, read_identity, set_config_value, set_credential_helper,
    ConfigScope,
};
pub use init::{
    check_git_available, commit, current_branch, has_commits, has_staged_changes, init_repository,
    rename_branch, stage_all, validate_branch_name, validate_target_directory,
};
pub use remote::{
    add_remote, get_remote_url, push_upstream, remote_exists, PushAuth, PUSH_TOKEN_ENV,
    PUSH_USERNAME_ENV,
};
pub use url::{GitUrl, UrlForm};

/// `git` invocation rooted at a repository
pub(crate) fn git(path: &Utf8Path) -> ExternalCommand {
    ExternalCommand::new("git").current_dir(path)
}
