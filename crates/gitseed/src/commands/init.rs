//! The bootstrap workflow
//!
//! Steps run strictly in order: dependency and directory checks, project
//! type selection, .gitignore composition, `git init`, identity, staging and
//! the first commit, branch rename, optional remote setup, then tutorial
//! output and the summary.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use gitseed_core::{HierarchicalConfigLoader, RuntimeConfig};
use gitseed_projects::git;
use gitseed_projects::gitignore::{compose_gitignore, ComposeReport, GitignoreProposal};
use gitseed_projects::{ProjectDetector, ProjectType, TemplateCatalog};
use gitseed_secrets::{CredentialResolver, SecretStore, SecretToolStore};
use tracing::debug;

use super::remote::{RemoteSetup, RemoteStage};
use crate::cli::Cli;
use crate::explain::{Narrator, Step};
use crate::prompts::{self, TerminalCredentialPrompt};
use crate::{output, tutorial};

/// Run the bootstrap workflow for `cli.directory`
pub async fn run(cli: Cli) -> Result<()> {
    let mut narrator = Narrator::new(cli.session_options());

    output::header("gitseed");

    let config = HierarchicalConfigLoader::new()
        .and_then(|loader| loader.load_runtime_config())
        .context("Failed to load configuration")?;

    git::check_git_available()
        .await
        .context("git is required but could not be run")?;
    let store = SecretToolStore::detect(&config.secrets);
    if store.is_none() {
        output::warning(&format!(
            "{} not found; credentials will be asked for and not saved",
            config.secrets.program
        ));
    }

    git::validate_target_directory(&cli.directory).await?;
    let dir = cli
        .directory
        .canonicalize_utf8()
        .with_context(|| format!("Failed to resolve {}", cli.directory))?;
    output::kv("Directory", dir.as_str());

    // .gitignore
    let catalog = TemplateCatalog::from_embedded().context("Failed to load gitignore templates")?;
    let project_type = choose_project_type(&dir, &catalog).await?;
    let report = write_gitignore(&dir, &config, &catalog, project_type).await?;

    // Repository and first commit
    narrator.before(Step::Init, "git init");
    git::init_repository(&dir).await?;
    output::success("Initialized git repository");

    ensure_identity(&dir, &mut narrator).await?;

    narrator.before(Step::StageAll, "git add .");
    git::stage_all(&dir).await?;

    narrator.before(Step::StagedProbe, "git diff --staged --quiet");
    let committed = if git::has_staged_changes(&dir).await? {
        let message = &config.git.initial_commit_message;
        narrator.before(Step::Commit, format!("git commit -m '{}'", message));
        git::commit(&dir, message).await?;
        output::success(&format!("Committed: {}", message));
        true
    } else {
        output::warning("Nothing to commit; skipping the initial commit");
        false
    };

    // Branch
    let branch = prompts::branch_name(&config.git.default_branch)?;
    git::validate_branch_name(&branch)?;
    narrator.before(Step::RenameBranch, format!("git branch -M {}", branch));
    git::rename_branch(&dir, &branch).await?;
    output::success(&format!("Default branch is '{}'", branch));

    // Remote
    let remote_name = config.git.remote_name.as_str();
    let prompt = TerminalCredentialPrompt;
    let resolver = CredentialResolver::new(
        store.as_ref().map(|s| s as &dyn SecretStore),
        &prompt,
        config.secrets.clone(),
    );
    let setup = RemoteSetup {
        dir: &dir,
        remote_name,
        branch: &branch,
        resolver: &resolver,
    };

    let requested = if committed {
        RemoteStage::requested(prompts::remote_url(remote_name)?)
    } else {
        output::info("Skipping remote setup until there is a commit to push");
        RemoteStage::NoRemoteRequested
    };

    let remote_url = match setup.run(requested, &mut narrator).await? {
        RemoteStage::Pushed {
            url,
            credentials_source,
        } => {
            if credentials_source.is_some() {
                offer_credential_helper(&config, &mut narrator).await?;
            }
            Some(url.to_string())
        }
        _ => None,
    };

    // Tutorial
    let current = git::current_branch(&dir).await?.unwrap_or(branch);
    if narrator.options().tutorial {
        let input = tutorial::CheatsheetInput {
            project_type,
            branch: &current,
            remote_name,
            remote_url: remote_url.as_deref(),
            steps: narrator.executed(),
        };
        let path = tutorial::write_cheatsheet(&dir, &config.tutorial.cheatsheet_file, &input).await?;
        output::success(&format!("Wrote {}", path));
        tutorial::print_walkthrough(narrator.executed());
    }

    Summary {
        directory: dir,
        project_type,
        branch: Some(current),
        remote: remote_url.map(|url| format!("{} ({})", remote_name, url)),
        entries_added: report.added.len(),
        committed,
    }
    .print();

    Ok(())
}

async fn choose_project_type(dir: &Utf8Path, catalog: &TemplateCatalog) -> Result<Option<ProjectType>> {
    let candidates = ProjectDetector::new().detect_dir(dir).await?;

    match candidates.primary() {
        Some(primary) => output::info(&format!(
            "Detected project type: {} ({} candidate{})",
            primary,
            candidates.len(),
            if candidates.len() == 1 { "" } else { "s" }
        )),
        None => output::info("No project markers found"),
    }

    let Some(input) = prompts::project_type(&candidates)? else {
        return Ok(None);
    };
    Ok(resolve_project_type(catalog, &input))
}

/// Map operator input to a catalog type; unknown input yields `None`
fn resolve_project_type(catalog: &TemplateCatalog, input: &str) -> Option<ProjectType> {
    let identifier = ProjectType::from_str_with_aliases(input)
        .map(|t| t.as_str())
        .unwrap_or(input);

    if catalog.resolve(identifier).is_none() {
        output::warning(&format!(
            "Unknown project type '{}'; using general defaults only (available: {})",
            input,
            ProjectType::available()
        ));
        return None;
    }

    ProjectType::from_identifier(identifier)
}

async fn write_gitignore(
    dir: &Utf8Path,
    config: &RuntimeConfig,
    catalog: &TemplateCatalog,
    project_type: Option<ProjectType>,
) -> Result<ComposeReport> {
    let proposal = GitignoreProposal::from_config(
        &config.gitignore,
        project_type.map(|t| catalog.patterns(t)),
    );

    output::header("Proposed .gitignore entries");
    for entry in proposal.entries() {
        println!("  {}", entry);
    }
    println!();

    let choice = prompts::gitignore_choice()?;
    let report = compose_gitignore(dir, &proposal, &choice).await?;

    for (entry, reason) in &report.rejected {
        output::warning(&format!("Skipped '{}': {}", entry, reason));
    }

    if report.skipped {
        output::info("Left .gitignore untouched");
    } else if report.added.is_empty() {
        output::info("No entries added to .gitignore");
    } else {
        output::success(&format!("Added {} entries to .gitignore", report.added.len()));
    }
    if !report.duplicates.is_empty() {
        debug!("{} entries already present", report.duplicates.len());
    }

    Ok(report)
}

async fn ensure_identity(dir: &Utf8Path, narrator: &mut Narrator) -> Result<()> {
    if let Some(identity) = git::read_identity(dir).await? {
        debug!("Committing as {} <{}>", identity.name, identity.email);
        return Ok(());
    }

    output::info("git needs a name and email to record commits");
    let identity = prompts::git_identity()?;
    narrator.before(
        Step::ConfigureIdentity,
        format!(
            "git config --local user.name '{}' && git config --local user.email {}",
            identity.name, identity.email
        ),
    );
    git::configure_identity(dir, &identity).await?;
    Ok(())
}

async fn offer_credential_helper(config: &RuntimeConfig, narrator: &mut Narrator) -> Result<()> {
    let Some(helper) = config.git.credential_helper.as_deref() else {
        return Ok(());
    };

    let prompt = format!("Let git remember HTTPS credentials with the '{}' helper?", helper);
    if !prompts::confirm(&prompt, false)? {
        return Ok(());
    }

    narrator.before(
        Step::CredentialHelper,
        format!("git config --global credential.helper {}", helper),
    );
    match git::set_credential_helper(helper).await {
        Ok(()) => output::success(&format!("credential.helper set to '{}'", helper)),
        Err(e) => output::warning(&format!("Could not set credential helper: {}", e)),
    }
    Ok(())
}

/// End-of-run report
#[derive(Debug)]
struct Summary {
    directory: Utf8PathBuf,
    project_type: Option<ProjectType>,
    branch: Option<String>,
    remote: Option<String>,
    entries_added: usize,
    committed: bool,
}

impl Summary {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Directory", self.directory.to_string()),
            (
                "Project type",
                self.project_type
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            (
                "Branch",
                self.branch.clone().unwrap_or_else(|| "(detached)".to_string()),
            ),
            (
                "Initial commit",
                if self.committed { "yes" } else { "skipped" }.to_string(),
            ),
            (
                "Remote",
                self.remote.clone().unwrap_or_else(|| "none".to_string()),
            ),
            (".gitignore entries added", self.entries_added.to_string()),
        ]
    }

    fn print(&self) {
        output::header("Summary");
        for (key, value) in self.rows() {
            output::kv(key, &value);
        }
        println!();
        output::success("Repository ready");
    }
}
