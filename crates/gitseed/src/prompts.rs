//! Interactive prompts

use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};
use gitseed_projects::gitignore::ComposeChoice;
use gitseed_projects::{CandidateList, GitIdentity, ProjectType};
use gitseed_secrets::{CredentialPrompt, SecureString};

/// Pick a project type, returning the raw identifier or `None` for no template
///
/// Detected candidates are offered first; otherwise the operator types one.
pub fn project_type(candidates: &CandidateList) -> Result<Option<String>> {
    if candidates.is_empty() {
        return manual_project_type();
    }

    let mut items: Vec<String> = candidates
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let suffix = if i == 0 { " (recommended)" } else { "" };
            format!("{} - {}{}", t, t.description(), suffix)
        })
        .collect();
    let manual = items.len();
    items.push("Another type...".to_string());
    items.push("No template (general defaults only)".to_string());

    let selection = Select::new()
        .with_prompt("Select project type")
        .items(&items)
        .default(0)
        .interact()?;

    match candidates.as_slice().get(selection) {
        Some(t) => Ok(Some(t.as_str().to_string())),
        None if selection == manual => manual_project_type(),
        None => Ok(None),
    }
}

fn manual_project_type() -> Result<Option<String>> {
    let available: Vec<&str> = ProjectType::all().iter().map(|t| t.as_str()).collect();
    let input: String = Input::new()
        .with_prompt(format!(
            "Project type ({}; empty for none)",
            available.join(", ")
        ))
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

/// Decide what to do with the proposed .gitignore entries
pub fn gitignore_choice() -> Result<ComposeChoice> {
    let items = [
        "Use the proposed entries",
        "Replace them with my own entries",
        "Add my own entries to the proposal",
        "Skip .gitignore",
    ];

    let selection = Select::new()
        .with_prompt("How should .gitignore be written?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => ComposeChoice::AcceptProposed,
        1 => ComposeChoice::Replace(entries_input("Entries to use (space separated)")?),
        2 => ComposeChoice::Append(entries_input("Entries to add (space separated)")?),
        _ => ComposeChoice::Skip,
    })
}

fn entries_input(prompt: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Ask for the commit identity
pub fn git_identity() -> Result<GitIdentity> {
    let name: String = Input::new()
        .with_prompt("Your name for commits")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let email: String = Input::new()
        .with_prompt("Your email for commits")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.contains('@') {
                Ok(())
            } else {
                Err("Email must contain @")
            }
        })
        .interact_text()?;

    Ok(GitIdentity::new(name.trim(), email.trim()))
}

/// Ask for the default branch name
pub fn branch_name(default: &str) -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Default branch name")
        .default(default.to_string())
        .interact_text()?;
    Ok(name.trim().to_string())
}

/// Ask whether to connect a remote and, if so, for its URL
pub fn remote_url(remote_name: &str) -> Result<Option<String>> {
    if !confirm(&format!("Connect a remote repository as '{}'?", remote_name), false)? {
        return Ok(None);
    }

    let url: String = Input::new()
        .with_prompt("Remote URL (https://host/path.git or git@host:path.git)")
        .interact_text()?;
    Ok(Some(url.trim().to_string()))
}

/// Yes/no question
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Credential prompt backed by the terminal
pub struct TerminalCredentialPrompt;

impl CredentialPrompt for TerminalCredentialPrompt {
    fn username(&self, host: &str) -> gitseed_secrets::Result<String> {
        Input::new()
            .with_prompt(format!("Username for {}", host))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| gitseed_secrets::Error::prompt(e.to_string()))
    }

    fn token(&self, host: &str) -> gitseed_secrets::Result<SecureString> {
        Password::new()
            .with_prompt(format!("Token or password for {}", host))
            .allow_empty_password(true)
            .interact()
            .map(SecureString::from)
            .map_err(|e| gitseed_secrets::Error::prompt(e.to_string()))
    }
}
