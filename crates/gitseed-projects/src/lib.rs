//! # gitseed-projects
//!
//! Repository bootstrap library for the gitseed CLI providing:
//! - Project type detection over a directory snapshot
//! - The embedded per-type .gitignore template catalog
//! - .gitignore entry validation and append-only composition
//! - Git operations (init, commit, branch, config, remotes, push)
//! - A small process-execution abstraction returning structured output
//!
//! # Examples
//!
//! ## Detect a project and compose its .gitignore
//!
//! ```no_run
//! use gitseed_projects::gitignore::{compose_gitignore, ComposeChoice, GitignoreProposal};
//! use gitseed_projects::templates::{ProjectDetector, TemplateCatalog};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = Utf8Path::new("/tmp/my-project");
//! let catalog = TemplateCatalog::from_embedded()?;
//! let candidates = ProjectDetector::new().detect_dir(dir).await?;
//!
//! let template = candidates.primary().map(|t| catalog.patterns(t));
//! let proposal = GitignoreProposal::new(&[".DS_Store".to_string()], template);
//! let report = compose_gitignore(dir, &proposal, &ComposeChoice::AcceptProposed).await?;
//! println!("{} entries added", report.added.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Validate a remote URL
//!
//! ```
//! use gitseed_projects::git::GitUrl;
//!
//! let url = GitUrl::parse("git@gitlab.com:group/repo.git").unwrap();
//! assert_eq!(url.host(), "gitlab.com");
//! ```

pub mod error;
pub mod git;
pub mod gitignore;
pub mod process;
pub mod templates;
pub mod types;

pub use error::{Error, Result};
pub use process::{CommandOutput, ExternalCommand};
pub use types::{GitIdentity, ProjectType};

// Re-export template types for convenience
pub use templates::{CandidateList, ProjectDetector, TemplateCatalog};
