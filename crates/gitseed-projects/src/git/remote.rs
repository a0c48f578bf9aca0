//! Git remote management and the initial push

use super::git;
use crate::error::{Error, Result};
use crate::process::ExternalCommand;
use camino::Utf8Path;
use tracing::{debug, info};

/// Env var carrying the username to the inline credential responder
pub const PUSH_USERNAME_ENV: &str = "GITSEED_PUSH_USERNAME";
/// Env var carrying the token to the inline credential responder
pub const PUSH_TOKEN_ENV: &str = "GITSEED_PUSH_TOKEN";

/// One-shot credential helper answering `get` from the push env vars
const INLINE_CREDENTIAL_HELPER: &str = "credential.helper=!f() { test \"$1\" = get || exit 0; \
     echo \"username=${GITSEED_PUSH_USERNAME}\"; echo \"password=${GITSEED_PUSH_TOKEN}\"; }; f";

/// Username/token handed to a single push
#[derive(Clone, Copy)]
pub struct PushAuth<'a> {
    pub username: &'a str,
    pub token: &'a str,
}

impl std::fmt::Debug for PushAuth<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushAuth")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Add a remote to a repository
///
/// # Arguments
/// * `path` - Repository path
/// * `name` - Remote name (e.g., "origin")
/// * `url` - Remote URL
///
/// # Errors
/// Returns error if remote already exists or git command fails
pub async fn add_remote(path: &Utf8Path, name: &str, url: &str) -> Result<()> {
    info!("Adding remote '{}': {}", name, url);

    if remote_exists(path, name).await? {
        return Err(Error::remote_exists(name));
    }

    let output = git(path).args(["remote", "add", name, url]).run().await?;
    if !output.success() {
        return Err(Error::git_operation(format!(
            "Failed to add remote '{}': {}",
            name,
            output.error_message()
        )));
    }

    info!("Remote '{}' added successfully", name);
    Ok(())
}

/// Get the URL of a remote
///
/// # Returns
/// The remote URL if it exists, None otherwise
pub async fn get_remote_url(path: &Utf8Path, name: &str) -> Result<Option<String>> {
    let output = git(path).args(["remote", "get-url", name]).run().await?;

    if output.success() {
        Ok(Some(output.stdout_trimmed().to_string()))
    } else {
        Ok(None)
    }
}

/// Check if a remote exists
pub async fn remote_exists(path: &Utf8Path, name: &str) -> Result<bool> {
    Ok(get_remote_url(path, name).await?.is_some())
}

/// Push `branch` to `remote` and set it as upstream (`git push -u`)
///
/// With `auth`, any configured credential helpers are cleared for this
/// invocation and replaced by an inline responder that reads the username
/// and token from env vars set only on the child process. Terminal prompts
/// are disabled so a rejected credential fails instead of hanging.
pub async fn push_upstream(
    path: &Utf8Path,
    remote: &str,
    branch: &str,
    auth: Option<PushAuth<'_>>,
) -> Result<()> {
    info!("Pushing '{}' to '{}'", branch, remote);

    let mut cmd = git(path).env("GIT_TERMINAL_PROMPT", "0");
    if let Some(auth) = auth {
        cmd = with_inline_credentials(cmd, auth);
    }

    let output = cmd.args(["push", "-u", remote, branch]).run().await?;
    if !output.success() {
        return Err(Error::push_failed(remote, output.error_message()));
    }

    info!("Pushed '{}' to '{}'", branch, remote);
    Ok(())
}

/// Replace configured credential helpers with the inline responder
///
/// Must be applied before the git subcommand so the `-c` options take effect.
fn with_inline_credentials(cmd: ExternalCommand, auth: PushAuth<'_>) -> ExternalCommand {
    debug!("Using inline credential responder for {}", auth.username);
    cmd.args(["-c", "credential.helper=", "-c", INLINE_CREDENTIAL_HELPER])
        .env(PUSH_USERNAME_ENV, auth.username)
        .env(PUSH_TOKEN_ENV, auth.token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{commit, current_branch, init_repository, set_config_value, stage_all, ConfigScope};
    use tempfile::TempDir;

    async fn repo_with_commit(path: &Utf8Path) {
        init_repository(path).await.unwrap();
        for (key, value) in [
            ("user.name", "Test User"),
            ("user.email", "test@example.com"),
            ("commit.gpgsign", "false"),
        ] {
            set_config_value(Some(path), key, value, ConfigScope::Local)
                .await
                .unwrap();
        }
        std::fs::write(path.join("README.md"), "# test\n").unwrap();
        stage_all(path).await.unwrap();
        commit(path, "Initial commit").await.unwrap();
    }

    #[tokio::test]
    async fn test_add_remote() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        init_repository(path).await.unwrap();

        assert!(!remote_exists(path, "origin").await.unwrap());

        add_remote(path, "origin", "https://github.com/user/repo.git")
            .await
            .unwrap();
        assert_eq!(
            get_remote_url(path, "origin").await.unwrap().as_deref(),
            Some("https://github.com/user/repo.git")
        );

        let result = add_remote(path, "origin", "https://github.com/user/other.git").await;
        assert!(matches!(result, Err(Error::RemoteExists { .. })));
    }

    #[tokio::test]
    async fn test_push_to_local_bare_remote() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp_dir.path()).unwrap();
        let work = root.join("work");
        let bare = root.join("remote.git");
        std::fs::create_dir(&work).unwrap();

        let output = crate::process::ExternalCommand::new("git")
            .args(["init", "--bare", bare.as_str()])
            .run()
            .await
            .unwrap();
        assert!(output.success());

        repo_with_commit(&work).await;
        let branch = current_branch(&work).await.unwrap().unwrap();
        add_remote(&work, "origin", bare.as_str()).await.unwrap();

        let auth = PushAuth {
            username: "user",
            token: "not-used-for-local-paths",
        };
        push_upstream(&work, "origin", &branch, Some(auth))
            .await
            .unwrap();

        let upstream = crate::process::ExternalCommand::new("git")
            .current_dir(&work)
            .args(["rev-parse", "--abbrev-ref", "@{upstream}"])
            .run()
            .await
            .unwrap();
        assert_eq!(upstream.stdout_trimmed(), format!("origin/{}", branch));
    }

    #[tokio::test]
    async fn test_push_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp_dir.path()).unwrap();
        let work = root.join("work");
        std::fs::create_dir(&work).unwrap();

        repo_with_commit(&work).await;
        let missing = root.join("missing.git");
        add_remote(&work, "origin", missing.as_str()).await.unwrap();

        let result = push_upstream(&work, "origin", "main", None).await;
        assert!(matches!(result, Err(Error::PushFailed { .. })));
    }

    #[tokio::test]
    async fn test_inline_credentials_answer_fill() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        init_repository(path).await.unwrap();

        let auth = PushAuth {
            username: "octocat",
            token: "ghp with space$x",
        };
        let output = with_inline_credentials(git(path).env("GIT_TERMINAL_PROMPT", "0"), auth)
            .args(["credential", "fill"])
            .stdin_bytes("protocol=https\nhost=github.com\n\n")
            .run()
            .await
            .unwrap();

        assert!(output.success(), "{}", output.error_message());
        let lines: Vec<&str> = output.stdout.lines().collect();
        assert!(lines.contains(&"username=octocat"));
        assert!(lines.contains(&"password=ghp with space$x"));
    }

    #[tokio::test]
    async fn test_inline_credentials_ignore_store_and_erase() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        init_repository(path).await.unwrap();

        let auth = PushAuth {
            username: "octocat",
            token: "ghp_token",
        };
        for action in ["approve", "reject"] {
            let output = with_inline_credentials(git(path), auth)
                .args(["credential", action])
                .stdin_bytes("protocol=https\nhost=github.com\nusername=octocat\npassword=ghp_token\n\n")
                .run()
                .await
                .unwrap();
            assert!(output.success(), "{}: {}", action, output.error_message());
            assert!(output.stdout.is_empty());
        }
    }

    #[test]
    fn test_push_auth_debug_hides_token() {
        let auth = PushAuth {
            username: "octocat",
            token: "ghp_secret",
        };
        let rendered = format!("{:?}", auth);
        assert!(rendered.contains("octocat"));
        assert!(!rendered.contains("ghp_secret"));
    }
}
