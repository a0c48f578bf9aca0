//! Remote setup as an explicit stage sequence
//!
//! NoRemoteRequested → UrlEntered → UrlValidated → HostExtracted →
//! CredentialsResolved → RemoteAdded → Pushed
//!
//! Any failure halts the sequence. A remote that was already added is left
//! in place when the push fails.
//!
//! Every URL form visits every stage, but only HTTPS remotes consult the
//! credential resolver. SSH and scp-style remotes extract their host and
//! then reach `CredentialsResolved` with `credentials: None`, leaving
//! authentication to the operator's SSH keys.

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use gitseed_projects::git::{self, GitUrl, PushAuth};
use gitseed_secrets::{CredentialPair, CredentialResolver, CredentialSource};
use tracing::debug;

use crate::explain::{Narrator, Step};
use crate::output;

/// Where remote setup currently stands
#[derive(Debug)]
pub enum RemoteStage {
    /// Initial state; also terminal when the operator declines a remote
    NoRemoteRequested,
    UrlEntered {
        url: String,
    },
    UrlValidated {
        url: GitUrl,
    },
    HostExtracted {
        url: GitUrl,
        host: String,
    },
    /// `credentials` is `None` for SSH remotes
    CredentialsResolved {
        url: GitUrl,
        credentials: Option<CredentialPair>,
    },
    RemoteAdded {
        url: GitUrl,
        credentials: Option<CredentialPair>,
    },
    Pushed {
        url: GitUrl,
        credentials_source: Option<CredentialSource>,
    },
}

impl RemoteStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoRemoteRequested => "no-remote-requested",
            Self::UrlEntered { .. } => "url-entered",
            Self::UrlValidated { .. } => "url-validated",
            Self::HostExtracted { .. } => "host-extracted",
            Self::CredentialsResolved { .. } => "credentials-resolved",
            Self::RemoteAdded { .. } => "remote-added",
            Self::Pushed { .. } => "pushed",
        }
    }

    /// Entry point: the operator's answer to "connect a remote?"
    pub fn requested(url: Option<String>) -> Self {
        match url {
            Some(url) => Self::UrlEntered { url },
            None => Self::NoRemoteRequested,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NoRemoteRequested | Self::Pushed { .. })
    }
}

/// Everything the stages need to run against one repository
pub struct RemoteSetup<'a> {
    pub dir: &'a Utf8Path,
    pub remote_name: &'a str,
    pub branch: &'a str,
    pub resolver: &'a CredentialResolver<'a>,
}

impl RemoteSetup<'_> {
    /// Drive the sequence from `stage` until it reaches a terminal stage
    pub async fn run(&self, mut stage: RemoteStage, narrator: &mut Narrator) -> Result<RemoteStage> {
        while !stage.is_terminal() {
            let from = stage.name();
            stage = self.advance(stage, narrator).await?;
            debug!("Remote setup: {} -> {}", from, stage.name());
        }
        Ok(stage)
    }

    /// Perform exactly one transition
    pub async fn advance(&self, stage: RemoteStage, narrator: &mut Narrator) -> Result<RemoteStage> {
        match stage {
            RemoteStage::NoRemoteRequested | RemoteStage::Pushed { .. } => Ok(stage),

            RemoteStage::UrlEntered { url } => {
                let url = GitUrl::parse(&url)?;
                Ok(RemoteStage::UrlValidated { url })
            }

            RemoteStage::UrlValidated { url } => {
                let host = url.host().trim().to_string();
                if host.is_empty() {
                    return Err(anyhow!("Could not determine the host of {}", url));
                }
                Ok(RemoteStage::HostExtracted { url, host })
            }

            RemoteStage::HostExtracted { url, host } => {
                let credentials = if url.form().uses_token_auth() {
                    let pair = self
                        .resolver
                        .resolve(&host)
                        .await
                        .with_context(|| format!("Cannot push to {} without credentials", host))?;
                    if pair.source == (CredentialSource::Prompt { persisted: false }) {
                        output::warning("Credentials were not saved; you will be asked again next time");
                    }
                    Some(pair)
                } else {
                    output::info(&format!("{} remote, using your SSH keys", url.form()));
                    None
                };
                Ok(RemoteStage::CredentialsResolved { url, credentials })
            }

            RemoteStage::CredentialsResolved { url, credentials } => {
                narrator.before(
                    Step::AddRemote,
                    format!("git remote add {} {}", self.remote_name, url),
                );
                git::add_remote(self.dir, self.remote_name, url.as_str()).await?;
                output::success(&format!("Remote '{}' added", self.remote_name));
                Ok(RemoteStage::RemoteAdded { url, credentials })
            }

            RemoteStage::RemoteAdded { url, credentials } => {
                narrator.before(
                    Step::Push,
                    format!("git push -u {} {}", self.remote_name, self.branch),
                );

                let auth = credentials.as_ref().map(|pair| PushAuth {
                    username: &pair.username,
                    token: pair.token.as_str(),
                });

                let spinner = output::spinner(&format!(
                    "Pushing '{}' to {}...",
                    self.branch, self.remote_name
                ));
                let pushed = git::push_upstream(self.dir, self.remote_name, self.branch, auth).await;
                spinner.finish_and_clear();

                pushed.with_context(|| {
                    format!(
                        "Remote '{}' was added but the push failed; fix the problem and run \
                         `git push -u {} {}`, or remove it with `git remote remove {}`",
                        self.remote_name, self.remote_name, self.branch, self.remote_name
                    )
                })?;

                output::success(&format!("Pushed '{}' to {}", self.branch, url));
                Ok(RemoteStage::Pushed {
                    url,
                    credentials_source: credentials.map(|pair| pair.source),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SessionOptions;
    use gitseed_core::types::SecretStoreConfig;
    use gitseed_secrets::{CredentialPrompt, MemoryStore, SecureString};
    use tempfile::TempDir;

    struct NoPrompt;

    impl CredentialPrompt for NoPrompt {
        fn username(&self, _host: &str) -> gitseed_secrets::Result<String> {
            Ok(String::new())
        }

        fn token(&self, _host: &str) -> gitseed_secrets::Result<SecureString> {
            Ok(SecureString::default())
        }
    }

    async fn repo() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        git::init_repository(path).await.unwrap();
        temp_dir
    }

    #[test]
    fn test_requested() {
        assert!(matches!(
            RemoteStage::requested(None),
            RemoteStage::NoRemoteRequested
        ));
        assert!(matches!(
            RemoteStage::requested(Some("x".into())),
            RemoteStage::UrlEntered { .. }
        ));
        assert!(RemoteStage::NoRemoteRequested.is_terminal());
    }

    #[tokio::test]
    async fn test_https_stages_up_to_remote_added() {
        let temp_dir = repo().await;
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();

        let store = MemoryStore::new()
            .with_entry("git-username", "github.com", "octocat")
            .with_entry("git-token", "github.com", "ghp_stored");
        let resolver = CredentialResolver::new(Some(&store), &NoPrompt, SecretStoreConfig::default());
        let setup = RemoteSetup {
            dir,
            remote_name: "origin",
            branch: "main",
            resolver: &resolver,
        };
        let mut narrator = Narrator::new(SessionOptions::default());

        let mut stage = RemoteStage::requested(Some("https://github.com/user/repo.git".into()));
        for expected in [
            "url-validated",
            "host-extracted",
            "credentials-resolved",
            "remote-added",
        ] {
            stage = setup.advance(stage, &mut narrator).await.unwrap();
            assert_eq!(stage.name(), expected);
        }

        match &stage {
            RemoteStage::RemoteAdded { credentials, .. } => {
                let pair = credentials.as_ref().unwrap();
                assert_eq!(pair.username, "octocat");
                assert_eq!(pair.source, CredentialSource::SecretStore);
            }
            other => panic!("unexpected stage {}", other.name()),
        }
        assert_eq!(
            git::get_remote_url(dir, "origin").await.unwrap().as_deref(),
            Some("https://github.com/user/repo.git")
        );
        assert_eq!(narrator.executed().len(), 1);
    }

    #[tokio::test]
    async fn test_ssh_skips_credentials() {
        let temp_dir = repo().await;
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();

        let resolver = CredentialResolver::new(None, &NoPrompt, SecretStoreConfig::default());
        let setup = RemoteSetup {
            dir,
            remote_name: "origin",
            branch: "main",
            resolver: &resolver,
        };
        let mut narrator = Narrator::new(SessionOptions::default());

        let mut stage = RemoteStage::requested(Some("git@gitlab.com:group/repo.git".into()));
        for expected in ["url-validated", "host-extracted", "credentials-resolved"] {
            stage = setup.advance(stage, &mut narrator).await.unwrap();
            assert_eq!(stage.name(), expected);
            if let RemoteStage::HostExtracted { host, .. } = &stage {
                assert_eq!(host, "gitlab.com");
            }
        }
        assert!(matches!(
            stage,
            RemoteStage::CredentialsResolved {
                credentials: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_halts_before_touching_repo() {
        let temp_dir = repo().await;
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();

        let resolver = CredentialResolver::new(None, &NoPrompt, SecretStoreConfig::default());
        let setup = RemoteSetup {
            dir,
            remote_name: "origin",
            branch: "main",
            resolver: &resolver,
        };
        let mut narrator = Narrator::new(SessionOptions::default());

        let stage = RemoteStage::requested(Some("https://github.com/user/repo".into()));
        let result = setup.run(stage, &mut narrator).await;
        assert!(result.is_err());
        assert!(!git::remote_exists(dir, "origin").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_credentials_halt_before_remote_add() {
        let temp_dir = repo().await;
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();

        let resolver = CredentialResolver::new(None, &NoPrompt, SecretStoreConfig::default());
        let setup = RemoteSetup {
            dir,
            remote_name: "origin",
            branch: "main",
            resolver: &resolver,
        };
        let mut narrator = Narrator::new(SessionOptions::default());

        let stage = RemoteStage::requested(Some("https://github.com/user/repo.git".into()));
        let err = setup.run(stage, &mut narrator).await.unwrap_err();
        assert!(format!("{:#}", err).contains("without credentials"));
        assert!(!git::remote_exists(dir, "origin").await.unwrap());
    }
}
