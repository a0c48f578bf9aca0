//! Gitignore composition.
//!
//! Builds the proposed entry list (general defaults followed by template
//! entries), applies the operator's choice, then validates and deduplicates
//! every candidate against the current file content before appending the
//! survivors in a single write.

use super::validator::{validate_entry, EntryRejection};
use crate::error::Result;
use camino::Utf8Path;
use gitseed_core::types::GitignoreConfig;
use std::collections::HashSet;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// File name of the ignore file
pub const GITIGNORE_FILE: &str = ".gitignore";

/// What the operator decided to do with the proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeChoice {
    /// Use the proposed entries unchanged
    AcceptProposed,
    /// Discard the proposal and use this whitespace-separated input instead
    Replace(String),
    /// Keep the proposal and add this whitespace-separated input after it
    Append(String),
    /// Write nothing
    Skip,
}

/// Proposed entry list: general defaults ++ template entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitignoreProposal {
    entries: Vec<String>,
}

impl GitignoreProposal {
    /// Build a proposal; template entries are omitted when no type resolved
    pub fn new(general_defaults: &[String], template: Option<&[String]>) -> Self {
        let mut entries = general_defaults.to_vec();
        if let Some(template) = template {
            entries.extend_from_slice(template);
        }
        Self { entries }
    }

    /// Build a proposal from the configured general defaults
    pub fn from_config(config: &GitignoreConfig, template: Option<&[String]>) -> Self {
        Self::new(&config.general_defaults, template)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Candidate strings for the chosen action, or `None` when skipping
    pub fn candidates(&self, choice: &ComposeChoice) -> Option<Vec<String>> {
        match choice {
            ComposeChoice::AcceptProposed => Some(tokenize(&self.entries.join("\n"))),
            ComposeChoice::Replace(custom) => Some(tokenize(custom)),
            ComposeChoice::Append(additions) => {
                let mut candidates = tokenize(&self.entries.join("\n"));
                candidates.extend(tokenize(additions));
                Some(candidates)
            }
            ComposeChoice::Skip => None,
        }
    }
}

/// Split operator input on whitespace into individual candidates
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// Outcome of composing entries against a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeReport {
    /// Entries appended, in input order
    pub added: Vec<String>,
    /// Entries dropped by validation
    pub rejected: Vec<(String, EntryRejection)>,
    /// Entries already present
    pub duplicates: Vec<String>,
    /// Operator chose to skip persistence
    pub skipped: bool,
}

impl ComposeReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    /// Whether anything was written
    pub fn wrote_entries(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Decide which candidates to append, given the current file content
///
/// Pure: validation, then an exact whole-line match against `existing`.
/// A value accepted earlier in the same pass counts as present, so each
/// distinct value is appended at most once.
pub fn plan_entries(candidates: &[String], existing: &str) -> ComposeReport {
    let mut present: HashSet<&str> = existing.lines().map(str::trim_end).collect();
    let mut report = ComposeReport::default();

    for candidate in candidates {
        if let Err(reason) = validate_entry(candidate) {
            warn!("Rejected .gitignore entry '{}': {}", candidate, reason);
            report.rejected.push((candidate.clone(), reason));
            continue;
        }

        if !present.insert(candidate.as_str()) {
            debug!("Skipping duplicate .gitignore entry '{}'", candidate);
            report.duplicates.push(candidate.clone());
            continue;
        }

        report.added.push(candidate.clone());
    }

    report
}

/// Validate, deduplicate and append candidates to the ignore file at `path`
///
/// The file is created if absent and never rewritten. An empty accepted set
/// leaves the file untouched.
pub async fn append_entries(path: &Utf8Path, candidates: &[String]) -> Result<ComposeReport> {
    let existing = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let report = plan_entries(candidates, &existing);
    if report.added.is_empty() {
        info!("No new entries for {}", path);
        return Ok(report);
    }

    let mut block = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        block.push('\n');
    }
    for entry in &report.added {
        block.push_str(entry);
        block.push('\n');
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(block.as_bytes()).await?;
    file.flush().await?;

    info!("Appended {} entries to {}", report.added.len(), path);
    Ok(report)
}

/// Apply the operator's choice to the ignore file in `repo_dir`
pub async fn compose_gitignore(
    repo_dir: &Utf8Path,
    proposal: &GitignoreProposal,
    choice: &ComposeChoice,
) -> Result<ComposeReport> {
    let Some(candidates) = proposal.candidates(choice) else {
        info!("Skipping .gitignore update");
        return Ok(ComposeReport::skipped());
    };

    append_entries(&repo_dir.join(GITIGNORE_FILE), &candidates).await
}
