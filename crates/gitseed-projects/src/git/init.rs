//! Repository initialization, staging, commit and branch operations

use super::git;
use crate::error::{Error, Result};
use crate::process::ExternalCommand;
use camino::Utf8Path;
use tracing::{debug, info, warn};

const WRITE_PROBE: &str = ".gitseed-write-probe";

/// Check if git is available in PATH
pub async fn check_git_available() -> Result<()> {
    let output = ExternalCommand::new("git")
        .arg("--version")
        .run()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.success() {
        return Err(Error::GitNotFound);
    }

    debug!("Found {}", output.stdout_trimmed());
    Ok(())
}

/// Check that `path` can host a new repository
///
/// # Errors
/// Returns error if:
/// - The path doesn't exist or is not a directory
/// - The directory is not writable
/// - A `.git` entry is already present
pub async fn validate_target_directory(path: &Utf8Path) -> Result<()> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::invalid_directory(path.as_str(), "does not exist"));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_dir() {
        return Err(Error::invalid_directory(path.as_str(), "not a directory"));
    }

    if path.join(".git").exists() {
        return Err(Error::repo_exists(path.as_str()));
    }

    let probe = path.join(WRITE_PROBE);
    match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
        .await
    {
        Ok(_) => {
            if let Err(e) = tokio::fs::remove_file(&probe).await {
                warn!("Could not remove {}: {}", probe, e);
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Error::invalid_directory(path.as_str(), "not writable"));
        }
        Err(e) => {
            return Err(Error::invalid_directory(
                path.as_str(),
                format!("not writable: {}", e),
            ));
        }
    }

    Ok(())
}

/// Initialize a new git repository
///
/// # Arguments
/// * `path` - Directory to initialize; must pass [`validate_target_directory`]
///
/// # Returns
/// Ok(()) on success
pub async fn init_repository(path: &Utf8Path) -> Result<()> {
    info!("Initializing git repository at: {}", path);

    if path.join(".git").exists() {
        return Err(Error::repo_exists(path.as_str()));
    }

    let output = git(path).arg("init").run().await?;
    if !output.success() {
        return Err(Error::git_operation(format!(
            "git init failed: {}",
            output.error_message()
        )));
    }

    info!("Repository initialized successfully");
    Ok(())
}

/// Stage every file in the working tree (`git add .`)
pub async fn stage_all(path: &Utf8Path) -> Result<()> {
    debug!("Staging working tree");

    let output = git(path).args(["add", "."]).run().await?;
    if !output.success() {
        return Err(Error::git_operation(format!(
            "git add failed: {}",
            output.error_message()
        )));
    }

    Ok(())
}

/// Whether the index differs from HEAD
///
/// Probes with `git diff --staged --quiet`: exit 0 means nothing is staged,
/// exit 1 means there are staged changes.
pub async fn has_staged_changes(path: &Utf8Path) -> Result<bool> {
    let output = git(path)
        .args(["diff", "--staged", "--quiet"])
        .run()
        .await?;

    match output.code {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(Error::git_operation(format!(
            "git diff --staged failed: {}",
            output.error_message()
        ))),
    }
}

/// Create a commit from the current index
pub async fn commit(path: &Utf8Path, message: &str) -> Result<()> {
    info!("Creating commit: {}", message);

    let output = git(path).args(["commit", "-m", message]).run().await?;
    if !output.success() {
        return Err(Error::git_operation(format!(
            "git commit failed: {}",
            output.error_message()
        )));
    }

    info!("Commit created");
    Ok(())
}

/// Whether HEAD points at a commit
pub async fn has_commits(path: &Utf8Path) -> Result<bool> {
    let output = git(path)
        .args(["rev-parse", "--verify", "--quiet", "HEAD"])
        .run()
        .await?;
    Ok(output.success())
}

/// Check a branch name against the git ref-name rules
pub fn validate_branch_name(name: &str) -> Result<()> {
    const FORBIDDEN: [char; 7] = ['~', '^', ':', '?', '*', '[', '\\'];

    let invalid = name.is_empty()
        || name == "@"
        || name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(&c))
        || name.contains("..")
        || name.contains("@{")
        || name.contains("//")
        || name.starts_with('-')
        || name.starts_with('/')
        || name.ends_with('/')
        || name.ends_with('.')
        || name.ends_with(".lock");

    if invalid {
        return Err(Error::invalid_branch(name));
    }

    Ok(())
}

/// Rename the current branch (`git branch -M <name>`)
///
/// On an unborn branch, where older git refuses `branch -M`, HEAD is
/// repointed with `symbolic-ref` instead.
pub async fn rename_branch(path: &Utf8Path, name: &str) -> Result<()> {
    validate_branch_name(name)?;
    info!("Renaming current branch to: {}", name);

    let output = git(path).args(["branch", "-M", name]).run().await?;
    if output.success() {
        return Ok(());
    }

    if !has_commits(path).await? {
        debug!("No commits yet, repointing HEAD to {}", name);
        let output = git(path)
            .args(["symbolic-ref", "HEAD", &format!("refs/heads/{}", name)])
            .run()
            .await?;
        if output.success() {
            return Ok(());
        }
        return Err(Error::git_operation(format!(
            "git symbolic-ref failed: {}",
            output.error_message()
        )));
    }

    Err(Error::git_operation(format!(
        "git branch -M failed: {}",
        output.error_message()
    )))
}

/// Name of the checked-out branch, or `None` on a detached HEAD
pub async fn current_branch(path: &Utf8Path) -> Result<Option<String>> {
    let output = git(path)
        .args(["symbolic-ref", "--short", "HEAD"])
        .run()
        .await?;

    if !output.success() {
        debug!("HEAD is not a symbolic ref: {}", output.error_message());
        return Ok(None);
    }

    let branch = output.stdout_trimmed();
    Ok((!branch.is_empty()).then(|| branch.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{set_config_value, ConfigScope};
    use tempfile::TempDir;

    async fn init_with_identity(path: &Utf8Path) {
        init_repository(path).await.unwrap();
        set_config_value(Some(path), "user.name", "Test User", ConfigScope::Local)
            .await
            .unwrap();
        set_config_value(Some(path), "user.email", "test@example.com", ConfigScope::Local)
            .await
            .unwrap();
        set_config_value(Some(path), "commit.gpgsign", "false", ConfigScope::Local)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_git_available() {
        assert!(check_git_available().await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_target_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();

        assert!(validate_target_directory(path).await.is_ok());
        assert!(!path.join(WRITE_PROBE).exists());

        let missing = path.join("missing");
        assert!(matches!(
            validate_target_directory(&missing).await,
            Err(Error::InvalidDirectory { .. })
        ));

        let file = path.join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            validate_target_directory(&file).await,
            Err(Error::InvalidDirectory { .. })
        ));

        std::fs::create_dir(path.join(".git")).unwrap();
        assert!(matches!(
            validate_target_directory(path).await,
            Err(Error::RepoExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_init_repository() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();

        init_repository(path).await.unwrap();
        assert!(path.join(".git").exists());

        let result = init_repository(path).await;
        assert!(matches!(result, Err(Error::RepoExists { .. })));
    }

    #[tokio::test]
    async fn test_staged_probe_and_commit() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        init_with_identity(path).await;

        stage_all(path).await.unwrap();
        assert!(!has_staged_changes(path).await.unwrap());
        assert!(!has_commits(path).await.unwrap());

        std::fs::write(path.join(".gitignore"), "*.log\n").unwrap();
        stage_all(path).await.unwrap();
        assert!(has_staged_changes(path).await.unwrap());

        commit(path, "Initial commit").await.unwrap();
        assert!(has_commits(path).await.unwrap());
        assert!(!has_staged_changes(path).await.unwrap());
    }

    #[tokio::test]
    async fn test_commit_with_nothing_staged_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        init_with_identity(path).await;

        let result = commit(path, "empty").await;
        assert!(matches!(result, Err(Error::GitOperation { .. })));
    }

    #[tokio::test]
    async fn test_rename_branch() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        init_with_identity(path).await;

        std::fs::write(path.join("README.md"), "# test\n").unwrap();
        stage_all(path).await.unwrap();
        commit(path, "Initial commit").await.unwrap();

        rename_branch(path, "trunk").await.unwrap();
        assert_eq!(current_branch(path).await.unwrap().as_deref(), Some("trunk"));
    }

    #[tokio::test]
    async fn test_rename_unborn_branch() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        init_repository(path).await.unwrap();

        rename_branch(path, "main").await.unwrap();
        assert_eq!(current_branch(path).await.unwrap().as_deref(), Some("main"));
    }

    #[tokio::test]
    async fn test_rename_rejects_invalid_name_before_running_git() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();

        let result = rename_branch(path, "bad name").await;
        assert!(matches!(result, Err(Error::InvalidBranch { .. })));
    }

    #[test]
    fn test_validate_branch_name() {
        for name in ["main", "develop", "feature/login", "release-1.2", "v2_x"] {
            assert!(validate_branch_name(name).is_ok(), "{} should be valid", name);
        }

        for name in [
            "",
            "@",
            "has space",
            "tab\tname",
            "a..b",
            "a@{1}",
            "-leading",
            "/leading",
            "trailing/",
            "trailing.",
            "topic.lock",
            "a~1",
            "a^",
            "a:b",
            "what?",
            "glob*",
            "[x",
            "back\\slash",
            "double//slash",
        ] {
            assert!(
                matches!(validate_branch_name(name), Err(Error::InvalidBranch { .. })),
                "{:?} should be invalid",
                name
            );
        }
    }
}
