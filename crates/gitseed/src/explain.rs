//! Explain-mode notes and the record of executed git steps

use console::style;

use crate::cli::SessionOptions;
use crate::output;

/// A git step the workflow can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Init,
    ConfigureIdentity,
    StageAll,
    StagedProbe,
    Commit,
    RenameBranch,
    AddRemote,
    Push,
    CredentialHelper,
}

impl Step {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Init => "Create the repository",
            Self::ConfigureIdentity => "Set your commit identity",
            Self::StageAll => "Stage the working tree",
            Self::StagedProbe => "Check for staged changes",
            Self::Commit => "Record the first commit",
            Self::RenameBranch => "Name the default branch",
            Self::AddRemote => "Register the remote",
            Self::Push => "Publish the branch",
            Self::CredentialHelper => "Remember credentials",
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            Self::Init => {
                "Creates a hidden .git directory holding the object database, refs and \
                 config. Nothing in the working tree is tracked until it is added."
            }
            Self::ConfigureIdentity => {
                "Every commit records an author name and email. Setting them with --local \
                 affects only this repository and leaves your global config alone."
            }
            Self::StageAll => {
                "Copies every file not matched by .gitignore into the index, the staging \
                 area that the next commit is built from."
            }
            Self::StagedProbe => {
                "Compares the index with the last commit. Exit code 0 means nothing is \
                 staged, so there would be nothing to commit."
            }
            Self::Commit => {
                "Turns the staged snapshot into the first commit on the current branch. \
                 The message describes the change for anyone reading the history."
            }
            Self::RenameBranch => {
                "Renames the current branch, replacing any branch with that name (-M). \
                 Many hosts expect 'main' as the default branch."
            }
            Self::AddRemote => {
                "Stores a short name for the hosted repository URL so later fetches and \
                 pushes can refer to it by name."
            }
            Self::Push => {
                "Uploads the branch and records the remote branch as its upstream (-u), so \
                 a plain 'git push' or 'git pull' works from now on. For HTTPS remotes the \
                 username and token are passed to git for this one command only."
            }
            Self::CredentialHelper => {
                "Tells git which helper caches HTTPS credentials, so you are not asked for \
                 them on every push. This is written to your global git config."
            }
        }
    }
}

/// A step that actually ran, with its command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStep {
    pub step: Step,
    pub command: String,
}

/// Prints explain notes and records executed steps for the tutorial
#[derive(Debug, Default)]
pub struct Narrator {
    options: SessionOptions,
    executed: Vec<ExecutedStep>,
}

impl Narrator {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            executed: Vec::new(),
        }
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Call immediately before running `command`
    pub fn before(&mut self, step: Step, command: impl Into<String>) {
        let command = command.into();
        if self.options.explain {
            print_note(step, &command);
        }
        self.executed.push(ExecutedStep { step, command });
    }

    pub fn executed(&self) -> &[ExecutedStep] {
        &self.executed
    }
}

fn print_note(step: Step, command: &str) {
    println!();
    println!("{} {}", style("▶").magenta().bold(), style(step.title()).bold());
    output::command(command);
    for line in wrap(step.rationale(), 72) {
        println!("    {}", style(line).dim());
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_step_has_a_note() {
        for step in [
            Step::Init,
            Step::ConfigureIdentity,
            Step::StageAll,
            Step::StagedProbe,
            Step::Commit,
            Step::RenameBranch,
            Step::AddRemote,
            Step::Push,
            Step::CredentialHelper,
        ] {
            assert!(!step.title().is_empty());
            assert!(step.rationale().len() > 40);
        }
    }

    #[test]
    fn test_narrator_records_in_order() {
        let mut narrator = Narrator::new(SessionOptions::default());
        narrator.before(Step::Init, "git init");
        narrator.before(Step::StageAll, "git add .");

        let commands: Vec<_> = narrator
            .executed()
            .iter()
            .map(|s| s.command.as_str())
            .collect();
        assert_eq!(commands, ["git init", "git add ."]);
    }

    #[test]
    fn test_wrap() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, ["one two", "three", "four five"]);
        assert!(wrap("", 10).is_empty());
    }
}
