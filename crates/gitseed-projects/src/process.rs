//! External process execution
//!
//! Every call to `git` (and other helper binaries) goes through
//! [`ExternalCommand`], which always captures the exit code and both output
//! streams into a [`CommandOutput`]. Callers branch on that structured
//! result instead of raw process semantics.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Trimmed stdout
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Trimmed stderr, falling back to stdout when stderr is empty
    pub fn error_message(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Builder for a single external command invocation
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<Utf8PathBuf>,
    envs: Vec<(String, String)>,
    stdin: Option<Vec<u8>>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Utf8Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Set an environment variable on the child only
    ///
    /// Values never appear in [`ExternalCommand::display`] or in logs.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Bytes written to the child's stdin before it is closed
    pub fn stdin_bytes(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Shell-like rendering of the command line, for explain output and logs
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|a| {
            if a.is_empty() || a.contains(char::is_whitespace) || a.contains('"') {
                format!("'{}'", a)
            } else {
                a.clone()
            }
        }));
        parts.join(" ")
    }

    /// Run to completion and capture the result
    ///
    /// A missing binary maps to [`Error::CommandNotFound`]. A non-zero exit
    /// is not an error here; inspect [`CommandOutput::success`].
    pub async fn run(self) -> Result<CommandOutput> {
        debug!("Running: {}", self.display());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::command_not_found(&self.program)
            } else {
                Error::process_execution(format!("failed to start {}: {}", self.program, e))
            }
        })?;

        if let Some(input) = &self.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(input).await?;
                stdin.shutdown().await?;
            }
        }

        let output = child.wait_with_output().await?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        trace!("{} exited with {:?}", self.program, result.code);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let cmd = ExternalCommand::new("git").args(["commit", "-m", "Initial commit"]);
        assert_eq!(cmd.display(), "git commit -m 'Initial commit'");
    }

    #[test]
    fn test_display_hides_env_values() {
        let cmd = ExternalCommand::new("git")
            .arg("push")
            .env("GITSEED_PUSH_TOKEN", "hunter2");
        assert!(!cmd.display().contains("hunter2"));
    }

    #[test]
    fn test_error_message_prefers_stderr() {
        let output = CommandOutput {
            code: Some(1),
            stdout: "out\n".into(),
            stderr: " fatal: bad \n".into(),
        };
        assert_eq!(output.error_message(), "fatal: bad");
        assert!(!output.success());

        let output = CommandOutput {
            code: Some(1),
            stdout: "only stdout\n".into(),
            stderr: String::new(),
        };
        assert_eq!(output.error_message(), "only stdout");
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let result = ExternalCommand::new("gitseed-definitely-not-a-binary")
            .run()
            .await;
        assert!(matches!(result, Err(Error::CommandNotFound { .. })));
    }

    #[tokio::test]
    async fn test_captures_exit_code_and_stdin() {
        let output = ExternalCommand::new("git")
            .args(["hash-object", "--stdin"])
            .stdin_bytes("hello\n")
            .run()
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(
            output.stdout_trimmed(),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );

        let output = ExternalCommand::new("git")
            .arg("definitely-not-a-subcommand")
            .run()
            .await
            .unwrap();
        assert!(!output.success());
        assert!(!output.error_message().is_empty());
    }
}
